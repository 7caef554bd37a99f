//=========================================================================
// Aetheric Navigation: Library Root
//
// This crate defines the public API surface of the navigation host used
// by Aetheric retained-mode UI screens.
//
// Responsibilities:
// - Expose the navigation host (`NavigationHost`) and its builder
// - Expose the value types that describe navigation requests
//   (options, arguments, snapshots, animations)
// - Keep the command mailbox and persistence collaborators reachable
//   for applications that drive navigation from other contexts
//
// Typical usage:
// ```no_run
// use aetheric_navigation::prelude::*;
//
// #[derive(Default)]
// struct Screen;
// impl NavElement for Screen {}
//
// let mut registry = DestinationRegistry::<Screen>::new();
// registry.register_type::<Screen>("Home").ok();
//
// let mut host = NavigationHostBuilder::new(registry).build();
// host.navigate("Home", None, Arguments::new()).ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the navigation state machine and every collaborator
// interface it consumes. It is exposed publicly so applications can plug
// in their own element factories, transition players and stores.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `builder` holds the fluent configuration entry point for the host.
//
mod builder;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the host and its builder as the main entry points, so
// applications can `use aetheric_navigation::NavigationHost;` directly.
//
pub use builder::{HostConfig, NavigationHostBuilder};
pub use crate::core::navigation::NavigationHost;
