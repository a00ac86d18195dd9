/// Tunables for a `Chip8` interpreter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// How many ticks pass between timer decrements.
    /// 1 decrements every tick; 8 roughly approximates 60Hz timers against a 500Hz CPU.
    pub cycles_per_timer_tick: u32,
    /// Fixed seed for the random stream; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_timer_tick: 1,
            seed: None,
        }
    }
}
