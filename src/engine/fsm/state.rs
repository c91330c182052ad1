/// A named unit of behavior driven by a [`StateMachine`](super::StateMachine).
///
/// The lifecycle is:
///
/// 1. `on_enter()` - called once when the state becomes active
/// 2. `update()` / `fixed_update()` - called per tick while active
/// 3. `on_exit()` - called once when another state takes over
///
/// Every hook defaults to doing nothing.
pub trait State {
    /// Unique, case-sensitive name used for lookups
    fn name(&self) -> &str;

    fn on_enter(&mut self) {}

    fn on_exit(&mut self) {}

    fn update(&mut self) {}

    fn fixed_update(&mut self) {}
}
