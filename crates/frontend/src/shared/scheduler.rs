use gloo_timers::callback::Interval;

/// What a recurring timer should do after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a fresh interval, replacing any running one
    Arm(u32),
    /// Stop the running interval, if any
    Disarm,
}

/// Cancellable recurring task.
///
/// Owns at most one `Interval`; dropping it cancels the timer, so re-arming
/// always starts a full new period.
pub struct RepeatingTask {
    interval: Option<Interval>,
    tick: std::rc::Rc<dyn Fn()>,
}

impl RepeatingTask {
    pub fn new(tick: impl Fn() + 'static) -> Self {
        Self {
            interval: None,
            tick: std::rc::Rc::new(tick),
        }
    }

    pub fn apply(&mut self, command: TimerCommand) {
        // drop first: the old interval must never fire after a rearm
        self.interval = None;
        if let TimerCommand::Arm(ms) = command {
            let tick = self.tick.clone();
            self.interval = Some(Interval::new(ms, move || tick()));
        }
    }
}
