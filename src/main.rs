//! Offline playback: demodulates a raw sample file, decodes the frames, and
//! fuses them into per-aircraft state.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use adsb_fusion::aircraft::database::NoDatabase;
use adsb_fusion::aircraft::registry::AircraftRegistry;
use adsb_fusion::config::Config;
use adsb_fusion::sdr::demod::AdsbDemodulator;
use adsb_fusion::Message;

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!("Samples: {}", config.samples_path.display());

    let file = File::open(&config.samples_path)
        .with_context(|| format!("opening {}", config.samples_path.display()))?;
    let mut demodulator =
        AdsbDemodulator::new(BufReader::new(file)).context("starting demodulator")?;

    let mut registry = AircraftRegistry::new(NoDatabase);
    let mut frames = 0u64;
    let mut messages = 0u64;

    while let Some(frame) = demodulator.next_frame().context("reading samples")? {
        frames += 1;
        if let Some(message) = Message::decode(&frame) {
            messages += 1;
            registry
                .update_with(&message)
                .context("updating aircraft registry")?;
        }

        if frames % config.report_every_frames == 0 {
            info!(
                "{} frames, {} messages, {} aircraft ({} positioned)",
                frames,
                messages,
                registry.len(),
                registry.positioned_count()
            );
        }
    }

    let stats = demodulator.stats();
    info!(
        "Done: {} preambles matched, {} frames decoded, {} CRC rejects",
        stats.preambles_matched, stats.frames_decoded, stats.crc_rejects
    );
    info!("{} aircraft tracked at end of stream:", registry.len());
    for state in registry.states() {
        info!(
            "  {} {} pos={} alt={} spd={}",
            state.icao_address,
            state
                .call_sign
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state
                .altitude_ft
                .map(|a| format!("{a} ft"))
                .unwrap_or_else(|| "-".to_string()),
            state
                .speed_kts
                .map(|s| format!("{s:.0} kt"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}
