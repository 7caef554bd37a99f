//=========================================================================
// Command Mailbox
//=========================================================================
//
// Bounded queue of `HostCommand`s plus the process-wide slot other
// contexts post into.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{PoisonError, RwLock};

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::HostCommand;

//=== Global Slot =========================================================

static GLOBAL_SENDER: RwLock<Option<CommandSender>> = RwLock::new(None);

/// Binds `mailbox` as the process-wide command target.
///
/// Rebinding replaces the previous target.
pub fn bind_global(mailbox: &CommandMailbox) {
    let mut slot = GLOBAL_SENDER.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        warn!("Navigation bridge was already bound, replacing target");
    }
    *slot = Some(mailbox.sender());
    info!("Navigation bridge bound");
}

/// Detaches the process-wide target; later sends become no-ops.
pub fn unbind_global() {
    let mut slot = GLOBAL_SENDER.write().unwrap_or_else(PoisonError::into_inner);
    if slot.take().is_some() {
        info!("Navigation bridge unbound");
    }
}

pub fn is_bound() -> bool {
    GLOBAL_SENDER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Posts `command` to the bound mailbox.
///
/// Returns `false` without side effects when nothing is bound or the
/// mailbox is full.
pub fn send(command: HostCommand) -> bool {
    let slot = GLOBAL_SENDER.read().unwrap_or_else(PoisonError::into_inner);
    match slot.as_ref() {
        Some(sender) => sender.send(command),
        None => {
            debug!("Navigation bridge unbound, dropping {:?}", command);
            false
        }
    }
}

//=== CommandSender =======================================================

/// Cloneable, thread-safe handle for posting commands.
#[derive(Debug, Clone)]
pub struct CommandSender {
    inner: Sender<HostCommand>,
}

impl CommandSender {
    /// Posts without blocking. Returns `false` if the command was dropped.
    pub fn send(&self, command: HostCommand) -> bool {
        match self.inner.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                warn!("Navigation mailbox full, dropping {:?}", command);
                false
            }
            Err(TrySendError::Disconnected(command)) => {
                debug!("Navigation mailbox closed, dropping {:?}", command);
                false
            }
        }
    }
}

//=== CommandMailbox ======================================================

/// Receiving end owned next to the host on the UI thread.
pub struct CommandMailbox {
    sender: Sender<HostCommand>,
    receiver: Receiver<HostCommand>,
}

impl CommandMailbox {
    /// Creates a mailbox holding at most `capacity` pending commands.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Mailbox capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            inner: self.sender.clone(),
        }
    }

    /// Posts from the owning thread.
    pub fn post(&self, command: HostCommand) -> bool {
        self.sender().send(command)
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Takes up to `max` pending commands in arrival order.
    pub fn drain_frame(&self, max: usize) -> Vec<HostCommand> {
        let mut commands = Vec::new();

        while commands.len() < max {
            match self.receiver.try_recv() {
                Ok(command) => commands.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if commands.len() >= max && !self.receiver.is_empty() {
            warn!(
                "Navigation command backlog: handled {} this frame, {} still queued",
                commands.len(),
                self.receiver.len()
            );
        }

        commands
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
