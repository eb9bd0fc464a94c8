/// Components with animations or timers advance them on every tick.
pub trait OnTick {
    fn on_tick(&mut self);
}
