use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use iptvlink_core::{PosterAssetJob, SipsConverter};

pub fn run(source_dir: PathBuf, assets_dir: PathBuf, first: u32, last: u32) -> Result<()> {
    ensure!(first <= last, "empty poster range {}..={}", first, last);

    let job = PosterAssetJob {
        first,
        last,
        ..PosterAssetJob::new(source_dir, assets_dir)
    };

    let summary = job
        .run(&SipsConverter)
        .with_context(|| format!("failed to prepare {}", job.assets_dir.display()))?;

    for name in &summary.created {
        println!("Created PNG imageset for {}", name);
    }
    for name in &summary.missing {
        println!("Warning: Could not find source for {}", name);
    }
    for name in &summary.failed {
        println!("Warning: Could not convert source for {}", name);
    }
    println!("Done generating poster assets.");

    Ok(())
}
