//! Units of work bound to one (step, track) slot.

use futures::future::{FutureExt, LocalBoxFuture};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::plan::{StepLayout, Track};

/// An asynchronous unit of work.
///
/// Any `Fn() -> impl Future<Output = anyhow::Result<()>>` closure is an
/// operation, which keeps test doubles short:
///
/// ```
/// use ordertrack::engine::Operation;
///
/// let op = || async { Ok::<(), anyhow::Error>(()) };
/// let _boxed: Box<dyn Operation> = Box::new(op);
/// ```
pub trait Operation {
    /// Start the work. The engine awaits the returned future exactly once.
    fn run(&self) -> LocalBoxFuture<'_, anyhow::Result<()>>;
}

impl<F, Fut> Operation for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + 'static,
{
    fn run(&self) -> LocalBoxFuture<'_, anyhow::Result<()>> {
        (self)().boxed_local()
    }
}

/// Timing knobs for simulated operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    /// Wall-clock length of one nominal duration unit.
    pub time_unit: Duration,

    /// Upper bound of the random extra delay, as a fraction of the nominal delay.
    pub jitter: f64,

    /// Nominal duration of ledger operations.
    pub chain_time: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_millis(100),
            jitter: 0.1,
            chain_time: crate::plan::CHAIN_TIME,
        }
    }
}

impl SimulationSettings {
    /// Settings without jitter, for reproducible timing.
    pub fn exact(time_unit: Duration) -> Self {
        Self {
            time_unit,
            jitter: 0.0,
            ..Default::default()
        }
    }

    /// Nominal units `track` spends on `layout`; ledger slots take
    /// `chain_time`.
    pub fn units(&self, layout: &StepLayout, track: Track) -> Option<u32> {
        let nominal = layout.duration(track)?;
        Some(match track {
            Track::Ledger => self.chain_time,
            _ => nominal,
        })
    }
}

/// Operation that only waits.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedOperation {
    delay: Duration,
    jitter: f64,
}

impl SimulatedOperation {
    /// Operation lasting `units` time units plus jitter. Delays that do not
    /// fit a `Duration` saturate.
    pub fn new(units: u32, settings: &SimulationSettings) -> Self {
        Self {
            delay: settings
                .time_unit
                .checked_mul(units)
                .unwrap_or(Duration::MAX),
            jitter: settings.jitter,
        }
    }

    /// Nominal delay before jitter.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn sample_delay(&self) -> Duration {
        if self.jitter <= 0.0 {
            return self.delay;
        }
        let extra = self.jitter * rand::thread_rng().gen::<f64>();
        Duration::try_from_secs_f64(self.delay.as_secs_f64() * (1.0 + extra))
            .unwrap_or(self.delay)
    }
}

impl Operation for SimulatedOperation {
    fn run(&self) -> LocalBoxFuture<'_, anyhow::Result<()>> {
        let delay = self.sample_delay();
        async move {
            tokio::time::sleep(delay).await;
            Ok(())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn delay_scales_with_time_unit() {
        let settings = SimulationSettings::exact(Duration::from_millis(20));
        let op = SimulatedOperation::new(5, &settings);
        assert_eq!(op.delay(), Duration::from_millis(100));
        assert_eq!(op.sample_delay(), Duration::from_millis(100));
    }

    #[test]
    fn jitter_only_lengthens() {
        let settings = SimulationSettings {
            time_unit: Duration::from_millis(10),
            jitter: 0.5,
            chain_time: 5,
        };
        let op = SimulatedOperation::new(10, &settings);
        for _ in 0..20 {
            let d = op.sample_delay();
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(150));
        }
    }

    #[test]
    fn oversized_delays_do_not_panic() {
        let settings = SimulationSettings {
            time_unit: Duration::from_millis(u64::MAX),
            jitter: 0.0,
            chain_time: u32::MAX,
        };
        let op = SimulatedOperation::new(u32::MAX, &settings);
        assert_eq!(op.delay(), Duration::MAX);

        let settings = SimulationSettings {
            time_unit: Duration::from_millis(10),
            jitter: 1e30,
            chain_time: 5,
        };
        let op = SimulatedOperation::new(10, &settings);
        assert!(op.sample_delay() >= Duration::from_millis(100));
    }

    #[test]
    fn ledger_units_follow_chain_time() {
        let settings = SimulationSettings {
            chain_time: 8,
            ..Default::default()
        };
        let submit = crate::plan::PlanKind::Order.layout()[1];
        assert_eq!(settings.units(&submit, Track::Ledger), Some(8));
        assert_eq!(settings.units(&submit, Track::Local), Some(1));
        assert_eq!(settings.units(&submit, Track::Enclave), None);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_operation_sleeps() {
        let settings = SimulationSettings::exact(Duration::from_millis(100));
        let op = SimulatedOperation::new(3, &settings);

        let start = tokio::time::Instant::now();
        op.run().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn closures_are_operations() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let op = move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                Ok::<(), anyhow::Error>(())
            }
        };

        op.run().await.unwrap();
        op.run().await.unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn closure_errors_surface() {
        let op = || async { Err::<(), _>(anyhow::anyhow!("enclave unreachable")) };
        let err = op.run().await.unwrap_err();
        assert_eq!(err.to_string(), "enclave unreachable");
    }
}
