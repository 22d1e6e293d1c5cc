#![allow(dead_code)]

use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use certame::api;
use certame::config;
use certame::core;

use application::{Certame, Flags};
use config::{CertameConfig, CONFIG_VERSION};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new("dev.certame.app", CONFIG_VERSION)
        .expect("Failed to create cosmic config");
    let config = CertameConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(_, cfg)| cfg);

    // Set up logging to the systemd user journal (`journalctl --user -t certame -f`).
    // Wrapper filters: certame crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("certame") || target.starts_with("application") || target.starts_with("pages") || target.starts_with("components") {
                    let max = if certame::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()
            .unwrap()
            .with_syslog_identifier("certame".to_string());

        certame::set_debug_logging(config.debug_logging);

        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).unwrap();
        // Global max must be Debug so certame debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }

    localize::localize();

    // Open straight on one opportunity with `--oportunidade <id>`
    let launch_oportunidade = {
        let args: Vec<String> = std::env::args().collect();
        args.iter()
            .position(|a| a == "--oportunidade")
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.parse::<i64>().ok())
    };

    let mut settings = Settings::default();
    settings = settings.size_limits(Limits::NONE.min_width(600.0).min_height(400.0));

    let flags = Flags { config, cosmic_config: cosmic_cfg, launch_oportunidade };
    cosmic::app::run::<Certame>(settings, flags)?;

    Ok(())
}
