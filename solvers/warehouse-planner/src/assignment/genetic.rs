//! Genetic-algorithm assignment over a flattened task-permutation chromosome.

use super::{greedy::greedy_assign, split_evenly, Assignment};
use crate::path_library::PathLibrary;
use crate::progress::{ProgressPayload, ProgressSink, Stage};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use warehouse_core::Cell;

#[derive(Debug, Clone)]
pub struct GaConfig {
    pub population: usize,
    pub generations: u32,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population: 40,
            generations: 80,
            mutation_rate: 0.3,
            tournament_size: 3,
            seed: 0,
        }
    }
}

type Chromosome = Vec<Cell>;

fn fitness(
    chrom: &Chromosome,
    robots: &[Cell],
    library: &PathLibrary,
    cache: &mut HashMap<Chromosome, f64>,
) -> f64 {
    if let Some(&cached) = cache.get(chrom) {
        return cached;
    }
    let parts = split_evenly(chrom, robots.len());
    let mut total = 0.0;
    for (robot_idx, &robot) in robots.iter().enumerate() {
        let mut cur = robot;
        for &task in &parts[robot_idx] {
            total += library.cost(cur, task).as_f64();
            cur = task;
        }
    }
    cache.insert(chrom.clone(), total);
    total
}

fn ordered_crossover(a: &Chromosome, b: &Chromosome, rng: &mut StdRng) -> Chromosome {
    if a.len() < 2 {
        return a.clone();
    }
    let mut i = rng.gen_range(0..a.len());
    let mut j = rng.gen_range(0..a.len());
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    let mut child: Vec<Option<Cell>> = vec![None; a.len()];
    child[i..=j].copy_from_slice(&a[i..=j].iter().map(|&c| Some(c)).collect::<Vec<_>>());

    let present: std::collections::HashSet<Cell> = child.iter().flatten().copied().collect();
    let mut fill_idx = (j + 1) % a.len();
    for &candidate in b {
        if present.contains(&candidate) {
            continue;
        }
        child[fill_idx] = Some(candidate);
        fill_idx = (fill_idx + 1) % a.len();
    }
    child.into_iter().map(|c| c.unwrap()).collect()
}

fn mutate(chrom: &mut Chromosome, rng: &mut StdRng) {
    if chrom.len() < 2 {
        return;
    }
    let mut i = rng.gen_range(0..chrom.len());
    let mut j = rng.gen_range(0..chrom.len());
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    if rng.gen_bool(0.5) {
        chrom.swap(i, j);
    } else {
        chrom[i..j].shuffle(rng);
    }
}

fn tournament<'a>(
    population: &'a [Chromosome],
    k: usize,
    robots: &[Cell],
    library: &PathLibrary,
    cache: &mut HashMap<Chromosome, f64>,
    rng: &mut StdRng,
) -> &'a Chromosome {
    let k = k.min(population.len());
    let mut indices: Vec<usize> = (0..population.len()).collect();
    indices.shuffle(rng);
    indices
        .into_iter()
        .take(k)
        .min_by(|&a, &b| {
            let fa = fitness(&population[a], robots, library, cache);
            let fb = fitness(&population[b], robots, library, cache);
            fa.partial_cmp(&fb).unwrap()
        })
        .map(|idx| &population[idx])
        .unwrap()
}

/// Evolve a population of task permutations toward minimal total path cost.
pub fn ga_assign(
    robots: &[Cell],
    tasks: &[Cell],
    library: &PathLibrary,
    config: &GaConfig,
    progress: &dyn ProgressSink,
) -> Assignment {
    let span = tracing::info_span!(
        "assignment_ga",
        robots = robots.len(),
        tasks = tasks.len(),
        population = config.population,
        generations = config.generations
    );
    let _enter = span.enter();

    if tasks.is_empty() {
        return robots.iter().map(|&r| (r, Vec::new())).collect();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut cache: HashMap<Chromosome, f64> = HashMap::new();

    let greedy_seed = greedy_assign(robots, tasks, library);
    let mut greedy_flat: Chromosome = robots
        .iter()
        .flat_map(|r| greedy_seed.get(r).cloned().unwrap_or_default())
        .collect();
    if greedy_flat.is_empty() {
        greedy_flat = tasks.to_vec();
    }

    let mut population: Vec<Chromosome> = vec![greedy_flat];
    while population.len() < config.population {
        let mut perm = tasks.to_vec();
        perm.shuffle(&mut rng);
        population.push(perm);
    }

    for generation in 0..config.generations {
        let elite = population
            .iter()
            .min_by(|a, b| {
                let fa = fitness(a, robots, library, &mut cache);
                let fb = fitness(b, robots, library, &mut cache);
                fa.partial_cmp(&fb).unwrap()
            })
            .unwrap()
            .clone();
        let best_cost = fitness(&elite, robots, library, &mut cache);
        tracing::trace!(generation, best_cost, "ga generation evaluated");
        progress.report(
            Stage::Assignment,
            ProgressPayload::AssignmentProgress {
                generation,
                best_cost,
            },
        );

        let mut next_population = vec![elite];
        while next_population.len() < config.population {
            let parent1 =
                tournament(&population, config.tournament_size, robots, library, &mut cache, &mut rng)
                    .clone();
            let parent2 =
                tournament(&population, config.tournament_size, robots, library, &mut cache, &mut rng)
                    .clone();
            let mut child = ordered_crossover(&parent1, &parent2, &mut rng);
            if rng.gen_bool(config.mutation_rate) {
                mutate(&mut child, &mut rng);
            }
            next_population.push(child);
        }
        population = next_population;
    }

    let best = population
        .iter()
        .min_by(|a, b| {
            let fa = fitness(a, robots, library, &mut cache);
            let fb = fitness(b, robots, library, &mut cache);
            fa.partial_cmp(&fb).unwrap()
        })
        .unwrap();
    let best_cost = fitness(best, robots, library, &mut cache);
    tracing::debug!(best_cost, "ga assignment complete");
    let parts = split_evenly(best, robots.len());
    robots
        .iter()
        .copied()
        .zip(parts)
        .collect::<Assignment>()
}
