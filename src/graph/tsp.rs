use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::prelude::*;
use rand::{
    distributions::{Distribution, WeightedError, WeightedIndex},
    Rng,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{GraphError, Result},
    model::{Graph, Weight},
};

/// Largest `alpha` or `beta` accepted, so `exponent * level.ln()` stays finite for any finite level.
pub const MAX_EXPONENT: f64 = 1000.0;

/// Knobs of the ant colony search.
///
/// Deserializing fills anything missing with the [Default] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntColonyConfig {
    /// Ants released per iteration
    pub agents: usize,
    pub iterations: usize,
    /// Fraction of pheromone lost at the end of each iteration, in `[0, 1]`
    pub evaporation_rate: f64,
    /// Influence of pheromone on the choice of the next vertex
    pub alpha: f64,
    /// Influence of inverse edge weight on the choice of the next vertex
    pub beta: f64,
    /// Pheromone an ant spreads over its tour, divided by the tour's length
    pub pheromone_deposit: f64,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        Self {
            agents: 10,
            iterations: 100,
            evaporation_rate: 0.5,
            alpha: 1.0,
            beta: 2.0,
            pheromone_deposit: 100.0,
        }
    }
}

impl AntColonyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.agents == 0 {
            return Err(GraphError::InvalidConfig("agents must be positive"));
        }
        if self.iterations == 0 {
            return Err(GraphError::InvalidConfig("iterations must be positive"));
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(GraphError::InvalidConfig(
                "evaporation_rate must be within [0, 1]",
            ));
        }
        if ![self.alpha, self.beta]
            .iter()
            .all(|exponent| (0.0..=MAX_EXPONENT).contains(exponent))
        {
            return Err(GraphError::InvalidConfig(
                "alpha and beta must be within [0, 1000]",
            ));
        }
        if !(self.pheromone_deposit.is_finite() && self.pheromone_deposit > 0.0) {
            return Err(GraphError::InvalidConfig(
                "pheromone_deposit must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Best closed tour found by the colony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tour {
    /// 1-based vertex ids, the first repeated at the end.
    pub tour: Vec<usize>,
    pub distance: u64,
    /// Best distance known after each completed iteration, `None` until a tour closes.
    pub best_by_iteration: Vec<Option<u64>>,
}

/// Approximate the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
/// with [ant colony optimization](https://en.wikipedia.org/wiki/Ant_colony_optimization_algorithms).
///
/// Every run owns its pheromone matrix and draws all randomness from the
/// caller's generator, so a seeded generator reproduces the same tour.
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    config: AntColonyConfig,
}

impl AntColony {
    pub fn new(config: AntColonyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AntColonyConfig {
        &self.config
    }

    pub fn solve<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> Result<Tour> {
        self.solve_with_cancel(graph, rng, &AtomicBool::new(false))
    }

    /// Like [AntColony::solve], stopping before the next iteration once `cancel` is set.
    ///
    /// A cancelled run still returns the best tour found so far.
    pub fn solve_with_cancel<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Tour> {
        let vertex_count = graph.vertex_count();
        if vertex_count <= 1 {
            return Err(GraphError::Infeasible { vertex_count });
        }
        let config = &self.config;
        let distances = graph.weights();
        let mut pheromones = Array2::from_elem((vertex_count, vertex_count), 1. / vertex_count as f64);

        let mut best: Option<(Vec<usize>, u64)> = None;
        let mut best_by_iteration = Vec::with_capacity(config.iterations);
        let mut cancelled = false;

        for iteration in 0..config.iterations {
            if cancel.load(Ordering::Relaxed) {
                info!(iteration, "Cancelled");
                cancelled = true;
                break;
            }

            let mut routes = Vec::with_capacity(config.agents);
            for _ in 0..config.agents {
                let route = self.construct_route(distances, pheromones.view(), &mut *rng)?;
                if let Some(length) = route_length(distances, &route) {
                    routes.push((route, length));
                }
            }
            if routes.is_empty() {
                warn!(iteration, "No ant closed a tour over existing edges");
            }

            for (route, length) in &routes {
                if best
                    .as_ref()
                    .map_or(true, |(_, best_length)| length < best_length)
                {
                    best = Some((route.clone(), *length));
                }
            }

            // Evaporate, then reinforce every edge in proportion to how short its tour was
            pheromones.mapv_inplace(|pheromone| pheromone * (1. - config.evaporation_rate));
            for (route, length) in &routes {
                let deposit = config.pheromone_deposit / *length as f64;
                for step in route.windows(2) {
                    let level = &mut pheromones[[step[0], step[1]]];
                    *level = (*level + deposit).min(f64::MAX);
                }
            }

            best_by_iteration.push(best.as_ref().map(|(_, length)| *length));
            debug!(
                "Iteration {}/{} (best: {:?}, closed: {}/{})",
                iteration + 1,
                config.iterations,
                best.as_ref().map(|(_, length)| *length),
                routes.len(),
                config.agents,
            );
        }

        match best {
            Some((route, distance)) => {
                info!(distance, "Found tour");
                Ok(Tour {
                    tour: route.into_iter().map(|index| index + 1).collect(),
                    distance,
                    best_by_iteration,
                })
            }
            None if cancelled => Err(GraphError::Cancelled),
            None => Err(GraphError::NoTour),
        }
    }

    /// Walk one ant from a random start through every vertex and back, as matrix indices.
    ///
    /// The walk may cross missing edges when an ant has no weighted choice left.
    ///
    /// Attractiveness `pheromone^alpha * (1 / distance)^beta` is computed in log
    /// space and scaled so the most attractive candidate weighs 1, which keeps
    /// every weight finite whatever the pheromone levels reach.
    fn construct_route<R: Rng + ?Sized>(
        &self,
        distances: ArrayView2<Weight>,
        pheromones: ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let vertex_count = distances.nrows();
        let mut visited = vec![false; vertex_count];
        let mut route = Vec::with_capacity(vertex_count + 1);

        let start = rng.gen_range(0..vertex_count);
        visited[start] = true;
        route.push(start);

        let mut current = start;
        let mut candidates = Vec::with_capacity(vertex_count);
        let mut attractiveness = Vec::with_capacity(vertex_count);
        while route.len() < vertex_count {
            candidates.clear();
            candidates.extend((0..vertex_count).filter(|v| !visited[*v]));
            attractiveness.clear();
            attractiveness.extend(candidates.iter().map(|next| {
                match distances[[current, *next]] {
                    0 => f64::NEG_INFINITY,
                    distance => {
                        scaled_ln(pheromones[[current, *next]], self.config.alpha)
                            - scaled_ln(distance as f64, self.config.beta)
                    }
                }
            }));
            let most_attractive = attractiveness
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            attractiveness.iter_mut().for_each(|weight| {
                *weight = if most_attractive == f64::NEG_INFINITY {
                    0.
                } else {
                    (*weight - most_attractive).exp()
                };
            });

            let next = match WeightedIndex::new(&attractiveness) {
                Ok(choice) => candidates[choice.sample(rng)],
                Err(WeightedError::AllWeightsZero) => candidates[rng.gen_range(0..candidates.len())],
                Err(err) => return Err(err.into()),
            };
            visited[next] = true;
            route.push(next);
            current = next;
        }

        route.push(start);
        Ok(route)
    }
}

/// `exponent * value.ln()`, i.e. the log of `value.powf(exponent)`, with `0^0 = 1`.
fn scaled_ln(value: f64, exponent: f64) -> f64 {
    if exponent == 0. {
        0.
    } else {
        exponent * value.ln()
    }
}

/// Sum of the weights along `route`, or `None` if it crosses a missing edge.
fn route_length(distances: ArrayView2<Weight>, route: &[usize]) -> Option<u64> {
    route.windows(2).try_fold(0u64, |length, step| {
        match distances[[step[0], step[1]]] {
            0 => None,
            weight => Some(length + weight as u64),
        }
    })
}

/// [AntColony::solve] with the default configuration.
pub fn solve_tsp<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Tour> {
    AntColony::default().solve(graph, rng)
}
