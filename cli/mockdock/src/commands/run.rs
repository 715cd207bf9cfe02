use crate::cli::RunArgs;
use crate::state::AppState;
use mockdock_common::diagnostic::Error;
use mockdock_domain::image::ImageRef;
use rand::Rng;
use std::io::Write;
use tracing::info;

const ADJECTIVES: [&str; 10] = [
    "bold", "brave", "calm", "eager", "fierce", "gentle", "happy", "jolly", "kind", "lively",
];
const NOUNS: [&str; 10] = [
    "ant", "bear", "cat", "dog", "eagle", "fox", "giraffe", "horse", "iguana", "jaguar",
];

pub fn handle(state: &AppState, args: &RunArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let reference = ImageRef::parse(&args.image).map_err(Error::new)?;

    let Some(image) = state.images.find(&reference) else {
        writeln!(out, "Image '{reference}' not found. Please pull it first.")?;
        return Ok(());
    };
    let image_ref = image.reference();

    let mut rng = rand::thread_rng();
    let name = match &args.name {
        Some(requested) => make_name_compatible(requested, &mut rng),
        None => generate_name(&mut rng),
    };

    writeln!(
        out,
        "Starting container '{}' from '{}' in namespace '{}'",
        name, image_ref, state.config.namespace
    )?;
    for port in &args.publish {
        writeln!(out, "  publish {port}")?;
    }
    for env in &args.env {
        writeln!(out, "  env {env}")?;
    }
    if !args.command.is_empty() {
        writeln!(out, "  command [{}]", args.command.join(" "))?;
    }

    let container = state.containers.create(&name, &image_ref)?;
    info!(id = %container.id(), name = %container.name(), image = %image_ref, detach = args.detach, "Container started");

    writeln!(
        out,
        "Created and started container '{}' (ID: {}) from image '{}'",
        container.name(),
        container.id(),
        container.image()
    )?;
    if !args.detach {
        writeln!(
            out,
            "Container keeps running in the background; stop it with: mockdock stop {}",
            container.name()
        )?;
    }
    Ok(())
}

/// `adjective-noun-N`, always a valid DNS-1123 label.
pub fn generate_name(rng: &mut impl Rng) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{}-{}-{}", adjective, noun, rng.gen_range(0..1000))
}

/// Lower-cases, maps `_` to `-`, drops anything outside `[a-z0-9-]` and
/// makes sure the result starts and ends with an alphanumeric.
pub fn make_name_compatible(name: &str, rng: &mut impl Rng) -> String {
    let mut cleaned: String = name
        .to_lowercase()
        .replace('_', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return format!("container-{}", rng.gen_range(0..1000));
    }
    if cleaned.starts_with('-') {
        cleaned.insert(0, 'c');
    }
    if cleaned.ends_with('-') {
        cleaned.push_str(&rng.gen_range(0..10).to_string());
    }
    cleaned
}
