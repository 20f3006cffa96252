use std::{env, error::Error};

use drumbrain_core::{
    brain::DrumBrain,
    config::BrainSettings,
    io::{Button, Pot},
    store::RamStorage,
    time::millis,
    Channel,
};
use drumbrain_synth::{
    commands::Command,
    output::{FifoSoundOutput, VelocitySettings},
    synth::{
        kit::{DrumKit, DrumKitSettings},
        SAMPLE_RATE,
    },
};
use drumbrain_ui::{frame_buffer::FrameBuffer, screen::Screen};
use env_logger::{Builder, Env};
use log::{info, LevelFilter};

use board::{Event, Queue, ScriptedBoard};

mod board;

const SAMPLES_PER_MS: usize = SAMPLE_RATE as usize / 1000;

fn script() -> Vec<(u32, Event)> {
    use Event::*;

    vec![
        (500, Strike(Channel::Drum1, 3000)),
        (900, Strike(Channel::Drum2, 1500)),
        (1300, Strike(Channel::Drum1, 600)),
        (1320, Strike(Channel::Drum1, 4000)), // masked, still ringing
        (1700, Strike(Channel::Drum2, 60)),   // too soft
        (2000, Turn(Pot::Volume, 2000)),
        (2400, Strike(Channel::Drum1, 3000)),
        (3000, Press(Button::Center)),
        (3200, Press(Button::Right)),
        (3300, Press(Button::Right)),
        (3400, Press(Button::Right)),
        (3600, Strike(Channel::Drum1, 3000)),
        (3800, Press(Button::Down)),
        (3900, Press(Button::Left)),
        (4000, Press(Button::Left)),
        (4200, Strike(Channel::Drum2, 3000)),
        (4500, Turn(Pot::Sensitivity, 3000)),
        (4600, Press(Button::Center)),
        (5000, Strike(Channel::Drum2, 500)), // below the new trigger value
        (5400, Strike(Channel::Drum2, 3500)),
        (5800, Turn(Pot::Sensitivity, 400)),
        (6500, Strike(Channel::Drum1, 2000)),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or(LevelFilter::Info.to_string())).init();

    let wav_path = env::args().nth(1).unwrap_or_else(|| "drumbrain.wav".into());
    let duration_ms = 40_000;

    let mut brain = DrumBrain::start(
        BrainSettings::default(),
        ScriptedBoard::new([4095, 400, 0]),
        FifoSoundOutput::new(Queue::default(), VelocitySettings::default()),
        Screen::new(FrameBuffer::new()),
        RamStorage::<64>::erased(),
        millis(0),
    );

    let mut kit = DrumKit::new(DrumKitSettings::default());

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&wav_path, spec)?;

    let mut events = script().into_iter().peekable();
    let mut shown = brain.display().panel().presented();
    dump_screen(brain.display().panel());

    for ms in 0..duration_ms {
        brain.io_mut().advance(ms);
        while let Some((_, event)) = events.next_if(|(at, _)| *at == ms) {
            info!("{ms} ms: {event:?}");
            brain.io_mut().apply(event);
        }

        brain.tick(millis(ms));

        for value in brain.sound_mut().fifo_mut().drain() {
            match Command::deserialize(value) {
                Some(command) => kit.run_command(command),
                None => log::warn!("Undecodable command {value:032b}"),
            }
        }

        for _ in 0..SAMPLES_PER_MS {
            writer.write_sample(kit.next().to_bits())?;
        }

        let presented = brain.display().panel().presented();
        if presented != shown && ms % 500 == 0 {
            dump_screen(brain.display().panel());
            shown = presented;
        }
    }

    writer.finalize()?;

    info!(
        "Stored notes after {} s: {:?}",
        duration_ms / 1000,
        &brain.store().storage().bytes()[..3]
    );
    info!("Wrote {wav_path}");

    Ok(())
}

fn dump_screen(frame: &FrameBuffer) {
    let mut ascii = String::new();
    if frame.write_ascii(&mut ascii).is_ok() {
        info!("screen:\n{ascii}");
    }
}
