//! Parallel render scheduling.
//!
//! A region is partitioned once into one contiguous work list per worker and
//! each list is rendered on a fixed rayon pool. Every worker owns a random
//! generator seeded from a base seed plus its index, so a fixed seed and
//! worker count reproduce the same image.
//!
//! Results are either composited into an [`ImageBuffer`] or streamed pixel by
//! pixel over a bounded channel. The channel closing marks the end of the
//! stream.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::SyncSender;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::partition::{partition, WorkList};
use crate::renderer::{render_pixel, RenderConfig};
use crate::{ImageBuffer, Pixel, Scene};

/// One fewer than the available cores, never below one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy)]
pub struct RenderReport {
    pub pixels_rendered: usize,
    /// The render stopped before every pixel was produced
    pub cancelled: bool,
    pub elapsed: Duration,
}

struct RenderPlan {
    work: Vec<WorkList>,
    pool: rayon::ThreadPool,
    seed: u64,
}

fn plan(config: &RenderConfig) -> RenderResult<RenderPlan> {
    config.region.validate()?;
    if config.samples_per_pixel == 0 {
        return Err(RenderError::ZeroSamples);
    }

    let workers = config.workers.filter(|&n| n > 0).unwrap_or_else(default_worker_count);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ember-worker-{}", i))
        .build()?;
    let seed = config.seed.unwrap_or_else(clock_seed);

    log::info!(
        "Rendering {} of {} pixels ({}x{}) with {} workers, {} spp, depth {}",
        config.region.pixel_count(),
        config.region.width() as usize * config.region.height() as usize,
        config.region.width(),
        config.region.height(),
        workers,
        config.samples_per_pixel,
        config.max_depth
    );
    log::debug!("Base seed {}", seed);

    Ok(RenderPlan {
        work: partition(&config.region, workers),
        pool,
        seed,
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn worker_rng(seed: u64, worker: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(worker as u64))
}

/// Render the configured region into an image buffer.
///
/// Pixels outside the region stay black.
pub fn render_to_buffer(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let start = Instant::now();
    let RenderPlan { work, pool, seed } = plan(config)?;

    let results: Vec<Vec<Pixel>> = pool.install(|| {
        work.into_par_iter()
            .map(|list| {
                let mut rng = worker_rng(seed, list.worker);
                list.pixels
                    .iter()
                    .map(|&(row, col)| render_pixel(scene, row, col, config, &mut rng))
                    .collect()
            })
            .collect()
    });

    let mut image = ImageBuffer::new(config.region.width(), config.region.height());
    for pixel in results.into_iter().flatten() {
        image.set(pixel);
    }

    log::info!("Render complete in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render the configured region, sending each pixel as soon as it is done.
///
/// Blocks until every worker has finished, then drops the last sender so the
/// receiver sees the channel close. The receiver must be drained on another
/// thread while this runs.
///
/// Workers check `cancel` between pixels and stop early once it is set. A
/// receiver that hangs up also stops every worker, but `cancel` is only read.
pub fn render_streaming(
    scene: &Scene,
    config: &RenderConfig,
    sender: SyncSender<Pixel>,
    cancel: &AtomicBool,
) -> RenderResult<RenderReport> {
    let start = Instant::now();
    let RenderPlan { work, pool, seed } = plan(config)?;
    let rendered = AtomicUsize::new(0);
    let hung_up = AtomicBool::new(false);

    pool.scope(|s| {
        for list in work {
            let sender = sender.clone();
            let rendered = &rendered;
            let hung_up = &hung_up;
            s.spawn(move |_| {
                let mut rng = worker_rng(seed, list.worker);
                let mut sent = 0;
                for (row, col) in list.pixels {
                    if cancel.load(Ordering::Relaxed) || hung_up.load(Ordering::Relaxed) {
                        break;
                    }
                    let pixel = render_pixel(scene, row, col, config, &mut rng);
                    if sender.send(pixel).is_err() {
                        log::warn!("Worker {}: receiver hung up", list.worker);
                        hung_up.store(true, Ordering::Relaxed);
                        break;
                    }
                    sent += 1;
                }
                rendered.fetch_add(sent, Ordering::Relaxed);
                log::debug!("Worker {} finished after {} pixels", list.worker, sent);
            });
        }
    });
    drop(sender);

    let pixels_rendered = rendered.into_inner();
    let report = RenderReport {
        pixels_rendered,
        cancelled: pixels_rendered < config.region.pixel_count(),
        elapsed: start.elapsed(),
    };
    if report.cancelled {
        log::warn!(
            "Render cancelled after {} of {} pixels",
            report.pixels_rendered,
            config.region.pixel_count()
        );
    } else {
        log::info!("Render complete in {:.2?}", report.elapsed);
    }
    Ok(report)
}
