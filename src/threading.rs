use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::images::{ImageRowsMut, TypedImage};
use crate::pixels::PixelTrait;
use crate::{ResizeError, WorkerFault};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;

        pub(crate) fn default_workers() -> usize {
            rayon::current_num_threads().max(1)
        }

        fn run_parts<P, F>(parts: Vec<ImageRowsMut<'_, P>>, work: &F) -> Vec<WorkerFault>
        where
            P: PixelTrait,
            F: Fn(&mut ImageRowsMut<'_, P>) + Sync,
        {
            parts
                .into_par_iter()
                .enumerate()
                .filter_map(|(worker, mut part)| run_worker(worker, &mut part, work))
                .collect()
        }
    } else {
        use std::thread;

        pub(crate) fn default_workers() -> usize {
            thread::available_parallelism().map_or(1, |n| n.get())
        }

        fn run_parts<P, F>(parts: Vec<ImageRowsMut<'_, P>>, work: &F) -> Vec<WorkerFault>
        where
            P: PixelTrait,
            F: Fn(&mut ImageRowsMut<'_, P>) + Sync,
        {
            thread::scope(|s| {
                let handles: Vec<_> = parts
                    .into_iter()
                    .enumerate()
                    .map(|(worker, mut part)| s.spawn(move || run_worker(worker, &mut part, work)))
                    .collect();
                handles
                    .into_iter()
                    .enumerate()
                    .filter_map(|(worker, handle)| match handle.join() {
                        Ok(fault) => fault,
                        Err(payload) => Some(WorkerFault::new(worker, panic_message(payload.as_ref()))),
                    })
                    .collect()
            })
        }
    }
}

/// Splits rows of destination image between `workers` and runs
/// `work` for every part concurrently.
///
/// Returns after all workers have finished. A panic inside of a worker
/// doesn't affect other workers, it is converted into [WorkerFault].
pub(crate) fn dispatch<P, F>(
    dst_image: &mut TypedImage<P>,
    workers: usize,
    work: F,
) -> Result<(), ResizeError>
where
    P: PixelTrait,
    F: Fn(&mut ImageRowsMut<'_, P>) + Sync,
{
    // It is useless to have more parts than rows.
    let num_parts = workers.clamp(1, (dst_image.height() as usize).max(1));
    let parts = dst_image.split_rows_mut(num_parts);
    let faults = run_parts(parts, &work);
    if faults.is_empty() {
        return Ok(());
    }
    for fault in faults.iter() {
        log::warn!("{}", fault);
    }
    Err(ResizeError::new(faults))
}

fn run_worker<P, F>(worker: usize, part: &mut ImageRowsMut<'_, P>, work: &F) -> Option<WorkerFault>
where
    P: PixelTrait,
    F: Fn(&mut ImageRowsMut<'_, P>) + Sync,
{
    panic::catch_unwind(AssertUnwindSafe(|| work(part)))
        .err()
        .map(|payload| WorkerFault::new(worker, panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
