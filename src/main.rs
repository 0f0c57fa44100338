//! Dedup Indexer - service entry point
//!
//! This binary is a thin wrapper around the library: argument parsing,
//! configuration loading, logging setup, and wiring the crawler and query
//! server onto a single-threaded runtime.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::cell::RefCell;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;

use dedup_indexer::cli::Args;
use dedup_indexer::core::config::Config;
use dedup_indexer::crawl::{walk, CrawlOptions};
use dedup_indexer::index::{FileIndex, Sha256Hasher, SharedIndex};
use dedup_indexer::server::QueryServer;
use dedup_indexer::{NAME, VERSION};

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(ref config_path) = args.config {
        match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: failed to load config file: {}", e);
                Config::default()
            }
        }
    } else {
        Config::load_default().unwrap_or_default()
    };

    apply_overrides(&mut config, &args);

    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    info!("{} v{}", NAME, VERSION);

    if config.crawl.directories.is_empty() {
        warn!("no directories configured; serving an empty index");
    }

    // Everything - crawl steps, index mutation, sessions, accepts - runs on
    // this one thread; the index is shared without locking.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(config))
}

async fn run(config: Config) -> Result<()> {
    let index: SharedIndex<Sha256Hasher> = Rc::new(RefCell::new(FileIndex::new()));

    let options = CrawlOptions {
        follow_symlinks: config.crawl.follow_symlinks,
        max_depth: config.crawl.max_depth,
    };

    for root in &config.crawl.directories {
        let index = Rc::clone(&index);
        let root = root.clone();
        let options = options.clone();
        let extensions = config.crawl.extensions.clone();

        tokio::task::spawn_local(async move {
            walk(
                &root,
                &options,
                move |entry| {
                    entry.file_type().is_file() && matches_extensions(entry.path(), &extensions)
                },
                move |entry| {
                    if let Err(e) = index.borrow_mut().push(entry.path()) {
                        warn!("skipping {}: {}", entry.path().display(), e);
                    }
                },
            )
            .await;
        });
    }

    let addr: IpAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind))?;
    let server = QueryServer::bind(SocketAddr::new(addr, config.server.port), index)
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.bind, config.server.port
            )
        })?;
    info!("listening on {}", server.local_addr()?);

    server.run().await;

    Ok(())
}

/// Apply CLI overrides to config; arguments win over file values.
fn apply_overrides(config: &mut Config, args: &Args) {
    if !args.directories.is_empty() {
        config.crawl.directories = args.directories.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref bind) = args.bind {
        config.server.bind = bind.clone();
    }
    if args.follow_symlinks {
        config.crawl.follow_symlinks = true;
    }
    if let Some(depth) = args.max_depth {
        config.crawl.max_depth = Some(depth);
    }
    if !args.extensions.is_empty() {
        config.crawl.extensions = args.extensions.clone();
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
}

/// Check a file against the configured extension filter (empty = index
/// all regular files). Matching is case-insensitive.
fn matches_extensions(path: &std::path::Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| {
            extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut config = Config::default();
        config.server.port = 9000;
        config.crawl.directories = vec![PathBuf::from("/from-config")];
        config.logging.level = "debug".to_string();

        let args = Args::parse_from([
            "dedup-indexer",
            "--port",
            "4242",
            "--extension",
            "jpg",
            "/from-cli",
        ]);
        apply_overrides(&mut config, &args);

        assert_eq!(config.server.port, 4242);
        assert_eq!(config.crawl.directories, vec![PathBuf::from("/from-cli")]);
        assert_eq!(config.crawl.extensions, vec!["jpg".to_string()]);
        // Unset arguments leave config values alone.
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.bind, "127.0.0.1");
    }

    #[test]
    fn test_extension_filter() {
        let exts = vec!["jpg".to_string(), "png".to_string()];
        assert!(matches_extensions(Path::new("/a/photo.jpg"), &exts));
        assert!(matches_extensions(Path::new("/a/PHOTO.JPG"), &exts));
        assert!(!matches_extensions(Path::new("/a/clip.mp4"), &exts));
        assert!(!matches_extensions(Path::new("/a/no_extension"), &exts));
        // Empty filter accepts everything.
        assert!(matches_extensions(Path::new("/a/anything.bin"), &[]));
    }
}

