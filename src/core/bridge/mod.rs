//=========================================================================
// Command Bridge
//=========================================================================
//
// Lets code that cannot hold a reference to the host (simulation jobs,
// scripting callbacks, other threads) request navigation.
//
// Architecture:
//   any context ── bridge::send(cmd) ──> global slot ──┐
//   any context ── CommandSender::send(cmd) ───────────┤
//                                                      ↓
//                          CommandMailbox (bounded crossbeam channel)
//                                                      ↓
//   UI thread: NavigationHost::process_commands(&mailbox) once per frame
//
// Sending never blocks. When nothing is bound, or the mailbox is full,
// the command is dropped and `send` reports `false`.
//
//=========================================================================

//=== Module Declarations =================================================

mod command;
mod mailbox;

//=== Public API ==========================================================

pub use command::HostCommand;
pub use mailbox::{bind_global, is_bound, send, unbind_global, CommandMailbox, CommandSender};
