//! `wh-schedule` — cancellable virtual-time timers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`timer_queue`] | `TimerQueue<E>` (`BTreeMap<(Tick, seq), E>`), `TimerId` |
//!
//! # Timer model (summary)
//!
//! A timer is a payload due at an absolute [`Tick`][wh_core::Tick].  The
//! owner drains due timers one at a time in `(tick, insertion)` order and
//! decides what each one means; repeating timers are simply re-pushed by the
//! owner when they fire.  Cancelling is immediate: a cancelled timer can
//! never be popped.

pub mod timer_queue;


pub use timer_queue::{TimerId, TimerQueue};
