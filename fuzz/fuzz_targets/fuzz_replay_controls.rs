#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortviz_core::Algorithm;
use sortviz_runtime::{
    Control, ManualTimer, MemorySessionStore, ReplayConfig, ReplayController, SessionKey, Status,
    TimerSource,
};

#[derive(Arbitrary, Debug)]
enum Op {
    Start,
    Restart,
    Stop,
    Resume,
    Back,
    Tick,
    Fire,
    JumpTo(u8),
    Submit(Vec<i8>),
    Switch(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    seed: u64,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 256 {
        return;
    }
    let config = ReplayConfig {
        seed: Some(input.seed),
        enforce_limits: false,
        ..ReplayConfig::default()
    };
    let mut controller = ReplayController::new(MemorySessionStore::new(), ManualTimer::new(), config);
    let mut key = SessionKey::new("fuzz", Algorithm::Insertion);

    for op in input.ops {
        let control = match op {
            Op::Start => Control::Start,
            Op::Restart => Control::Restart,
            Op::Stop => Control::Stop,
            Op::Resume => Control::Resume,
            Op::Back => Control::Back,
            Op::Tick => Control::Tick,
            Op::JumpTo(n) => Control::JumpTo(usize::from(n)),
            Op::Submit(values) => Control::Submit(values.into_iter().map(i32::from).collect()),
            Op::Fire => {
                controller.timer_mut().fire();
                if let Some(model) = controller.poll() {
                    assert!(model.cursor <= model.total_steps);
                }
                continue;
            }
            Op::Switch(n) => {
                let algorithm = Algorithm::ALL[usize::from(n) % Algorithm::ALL.len()];
                key = SessionKey::new("fuzz", algorithm);
                continue;
            }
        };
        let model = controller.dispatch(&key, control);
        assert!(model.cursor <= model.total_steps);
        if model.status == Status::Running {
            assert_eq!(controller.active_key(), Some(&key));
            assert!(controller.timer().is_armed());
        } else if controller.active_key() == Some(&key) {
            panic!("timer still held by a {} session", model.status);
        }
        if model.status == Status::Finished && model.total_steps > 0 {
            assert!(model.snapshot.is_sorted());
        }
    }
});
