use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::application::{BotConsole, ConsoleService};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::whatsapp::MockWhatsAppProbe;
use crate::interfaces::http::{add_log, LogEntry};

/// Everything the HTTP adapter needs, wired from `AppConfig`.
pub struct AppServices {
    pub console: Arc<ConsoleService>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

pub fn setup(config: &AppConfig) -> Result<AppServices> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let (console_rng, probe_rng) = seeded_rngs(config.rng_seed);

    let mut console = BotConsole::new(config.simulator.clone(), console_rng);
    if config.seed_sample_data {
        console.load_sample_data().map_err(|err| {
            error!(error = %err, "Failed to load sample data");
            err
        })?;
        add_log(&logs, "INFO", "Bootstrap", "Sample FAQs and templates loaded");
    }

    let probe = MockWhatsAppProbe::new(
        config.api_probe.delay(),
        config.api_probe.success_probability,
        probe_rng,
    );

    let service = ConsoleService::new(
        console,
        Arc::new(probe),
        config.deployment.delay(),
        config.export_dir.clone(),
    );

    info!(
        seeded = config.rng_seed.is_some(),
        export_dir = %config.export_dir.display(),
        "Console initialised"
    );

    Ok(AppServices {
        console: Arc::new(service),
        logs,
    })
}

/// Independent generators for the console and the probe; reproducible when
/// a seed is configured.
fn seeded_rngs(seed: Option<u64>) -> (StdRng, StdRng) {
    match seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_rngs_are_reproducible() {
        let (mut a, _) = seeded_rngs(Some(5));
        let (mut b, _) = seeded_rngs(Some(5));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[tokio::test]
    async fn test_setup_seeds_sample_data() {
        let services = setup(&AppConfig {
            rng_seed: Some(1),
            ..Default::default()
        })
        .unwrap();
        let console = services.console.console().await;
        assert_eq!(console.faqs().len(), 5);
        assert_eq!(console.templates().len(), 3);
        assert_eq!(services.logs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_setup_without_sample_data() {
        let services = setup(&AppConfig {
            seed_sample_data: false,
            ..Default::default()
        })
        .unwrap();
        let console = services.console.console().await;
        assert!(console.faqs().is_empty());
        assert!(services.logs.lock().unwrap().is_empty());
    }
}
