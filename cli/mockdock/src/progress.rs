//! Docker-looking progress output for simulated pulls and builds.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::time::Duration;

pub struct Progress<'a> {
    out: &'a mut dyn Write,
    delay: Duration,
}

impl<'a> Progress<'a> {
    pub fn new(out: &'a mut dyn Write, delay: Duration) -> Self {
        Self { out, delay }
    }

    /// Prints one line, flushes, then pauses for the configured delay.
    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}

const LAYER_STEPS: [&str; 5] = [
    "Pulling fs layer",
    "Downloading",
    "Download complete",
    "Extracting",
    "Pull complete",
];

/// Prints the layer-by-layer output of a pull of `reference`.
pub fn simulate_pull(progress: &mut Progress<'_>, name: &str, tag: &str) -> io::Result<()> {
    let reference = format!("{name}:{tag}");
    progress.line(format_args!("Pulling from {name}"))?;
    for layer in layer_ids(&reference, 3) {
        for step in LAYER_STEPS {
            progress.line(format_args!("{layer}: {step}"))?;
        }
    }
    progress.line(format_args!("Digest: sha256:{}", fake_digest(&reference)))?;
    progress.line(format_args!("Status: Downloaded newer image for {reference}"))
}

/// Stable 12-hex-digit layer IDs derived from `seed`.
pub fn layer_ids(seed: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{:012x}", hash_of(&(seed, i)) & 0xffff_ffff_ffff))
        .collect()
}

/// A stable 64-hex-digit string derived from `seed`.
pub fn fake_digest(seed: &str) -> String {
    (0..4u8).map(|i| format!("{:016x}", hash_of(&(seed, i)))).collect()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
