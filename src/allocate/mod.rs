//! Ratio-based line-budget allocation.
//!
//! Distributes a fixed total line budget across directory groups in
//! proportion to their ratios, then extracts whole files up to each
//! group's quota. Files are never split: the file that crosses the quota
//! threshold is included in full, and a group is truncated only when
//! files remain unconsumed. Groups that cannot fill their quota hand the
//! surplus back for proportional redistribution among the rest.

use tracing::debug;

use crate::domain::{AllocationPlan, DirectoryGroup, Excerpt};

/// Allocate `max_pages * lines_per_page` lines across the groups and
/// extract whole files up to each quota.
///
/// A zero ratio sum (including an empty group list) yields an empty
/// excerpt; there is no error case.
pub fn allocate_by_ratio(
    groups: &[DirectoryGroup],
    lines_per_page: usize,
    max_pages: usize,
) -> (Excerpt, Vec<AllocationPlan>) {
    let ratio_sum: f64 = groups.iter().map(|g| g.ratio).sum();
    if groups.is_empty() || ratio_sum == 0.0 {
        return (Excerpt::default(), Vec::new());
    }

    let budget = (max_pages * lines_per_page) as i64;

    // Ideal quotas, proportional and rounded
    let mut quotas: Vec<i64> = groups
        .iter()
        .map(|g| (budget as f64 * (g.ratio / ratio_sum)).round() as i64)
        .collect();

    // Rounding drift goes entirely to the largest-ratio group (first on
    // ties)
    let drift = budget - quotas.iter().sum::<i64>();
    if drift != 0 {
        let mut largest = 0;
        for (idx, group) in groups.iter().enumerate().skip(1) {
            if group.ratio > groups[largest].ratio {
                largest = idx;
            }
        }
        quotas[largest] += drift;
    }

    // Groups that cannot fill their quota release the difference
    let mut surplus: i64 = 0;
    let mut receivers: Vec<usize> = Vec::new();
    for (idx, group) in groups.iter().enumerate() {
        let available = group.total_lines as i64;
        if available <= quotas[idx] {
            surplus += quotas[idx] - available;
            quotas[idx] = available;
        } else {
            receivers.push(idx);
        }
    }

    // Redistribute the surplus over the receivers, proportional to their
    // ratios; the last receiver absorbs the rounding remainder, and every
    // receiver is clamped to what it can actually supply.
    if surplus > 0 && !receivers.is_empty() {
        let receiver_ratio: f64 = receivers.iter().map(|&idx| groups[idx].ratio).sum();
        let mut distributed: i64 = 0;
        let last = receivers.len() - 1;
        for (pos, &idx) in receivers.iter().enumerate() {
            if pos == last {
                quotas[idx] += surplus - distributed;
            } else {
                let extra =
                    (surplus as f64 * (groups[idx].ratio / receiver_ratio)).round() as i64;
                quotas[idx] += extra;
                distributed += extra;
            }
            quotas[idx] = quotas[idx].min(groups[idx].total_lines as i64);
        }
    }

    // Whole-file extraction, in original group order
    let mut lines: Vec<String> = Vec::new();
    let mut plans: Vec<AllocationPlan> = Vec::with_capacity(groups.len());
    let mut any_truncated = false;

    for (idx, group) in groups.iter().enumerate() {
        let quota = quotas[idx].max(0) as usize;
        let mut collected: Vec<String> = Vec::new();
        let mut collected_files = 0usize;
        let mut running = 0usize;

        for file in &group.files {
            if running >= quota {
                break;
            }
            collected.extend(file.lines.iter().cloned());
            running += file.line_count();
            collected_files += 1;
        }

        let truncated = collected_files < group.files.len();
        any_truncated |= truncated;
        debug!(
            path = %group.path,
            quota,
            collected = collected.len(),
            files = collected_files,
            truncated,
            "allocated group"
        );

        plans.push(AllocationPlan {
            path: group.path.clone(),
            ratio: group.ratio,
            quota,
            allocated_lines: collected.len(),
            allocated_pages: collected.len().div_ceil(lines_per_page.max(1)),
            allocated_files: collected_files,
            total_files: group.files.len(),
            total_lines: group.total_lines,
            truncated,
        });
        lines.append(&mut collected);
    }

    let total_pages = lines.len().div_ceil(lines_per_page.max(1));
    (Excerpt { lines, total_pages, truncated: any_truncated }, plans)
}

/// Flat-mode truncation for a single ordered line sequence.
///
/// When the natural page count exceeds the budget, the excerpt keeps the
/// first `floor(max_pages / 2)` pages and the last pages that fit in the
/// remainder, so both the program's start and its end are shown.
pub fn truncate_to_page_budget(
    lines: Vec<String>,
    lines_per_page: usize,
    max_pages: usize,
) -> Excerpt {
    let lines_per_page = lines_per_page.max(1);
    let total_pages = lines.len().div_ceil(lines_per_page);
    if total_pages <= max_pages {
        return Excerpt { lines, total_pages, truncated: false };
    }

    let front_pages = max_pages / 2;
    let back_pages = max_pages - front_pages;
    let front = front_pages * lines_per_page;
    let back = back_pages * lines_per_page;

    let mut kept: Vec<String> = lines[..front].to_vec();
    kept.extend_from_slice(&lines[lines.len() - back..]);
    Excerpt { lines: kept, total_pages: max_pages, truncated: true }
}
