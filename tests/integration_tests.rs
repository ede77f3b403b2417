use cascadeip::{greedy, heuristics, greedy_for_instance, simulate, Instance, NodeIndex};
use cascadeip::model::formulation::Formulation;
use cascadeip::parsers::graph_from_file;
use cascadeip::solvers::{ExactSolver, ExhaustiveSolver};

use std::path::PathBuf;

use assert_float_eq::*;
use paste::paste;

fn load(instance: &str, threshold: usize, target: usize) -> Instance {
    let path = PathBuf::from(format!("tests/instances/{}.txt", instance));
    let graph = graph_from_file(&path).unwrap();
    Instance::new(graph, threshold, target).unwrap()
}

macro_rules! integration_tests {
    ($($name:ident: [$instance:expr, $m:expr, $target:expr, $greedy_seeds:expr, $greedy_cost:expr, $optimum:expr],)*) => {
        $(
            paste! {
                #[test]
                fn [<greedy_ $name>]() {
                    let instance = load($instance, $m, $target);
                    let seeds = greedy_for_instance(&instance).unwrap();
                    assert_eq!($greedy_seeds, seeds.number_seeds());
                    assert_eq!(Some($greedy_cost), instance.cost(&seeds).unwrap());
                    assert!(simulate(instance.graph(), &seeds, $m).unwrap() >= $target);
                }

                #[test]
                fn [<greedy_is_minimal_ $name>]() {
                    let instance = load($instance, $m, $target);
                    let mut seeder = greedy::QuietGreedySeeder::new(instance.graph(), heuristics::popularity::PopularityRanking::default());
                    let seeds = seeder.seed($m, $target).unwrap();
                    let last = *seeder.seeding_order().last().unwrap();
                    let mut without_last = seeds.clone();
                    without_last.unseed(last);
                    assert!(simulate(instance.graph(), &without_last, $m).unwrap() < $target);
                }

                #[test]
                fn [<exhaustive_ $name>]() {
                    let instance = load($instance, $m, $target);
                    let greedy = greedy_for_instance(&instance).unwrap();
                    let solver = ExhaustiveSolver::default();
                    let with_start = solver.solve(&instance, Some(&greedy)).unwrap();
                    let without_start = solver.solve(&instance, None).unwrap();
                    assert_float_absolute_eq!($optimum as f64, with_start.objective().unwrap(), 1e-9);
                    assert_float_absolute_eq!($optimum as f64, without_start.objective().unwrap(), 1e-9);
                    assert!(with_start.objective().unwrap() <= $greedy_cost as f64);
                }

                #[test]
                fn [<warm_start_is_feasible_ $name>]() {
                    let instance = load($instance, $m, $target);
                    let formulation = Formulation::new(&instance);
                    let greedy = greedy_for_instance(&instance).unwrap();
                    let assignment = formulation.assignment_from_seeds(&instance, &greedy).unwrap();
                    assert!(formulation.model().violations(&assignment).is_empty());
                    assert_float_absolute_eq!($greedy_cost as f64, formulation.model().objective_value(&assignment), 1e-9);
                }
            }
        )*
    }
}

integration_tests! {
    path_5_m1_all: ["path_5", 1, 5, 1, 1, 1],
    path_5_m2_all: ["path_5", 2, 5, 5, 5, 3],
    path_5_m2_three: ["path_5", 2, 3, 3, 11, 8],
    star_6_m1_all: ["star_6", 1, 6, 1, 1, 1],
    star_6_m2_all: ["star_6", 2, 6, 6, 6, 5],
    star_6_m2_two: ["star_6", 2, 2, 2, 14, 13],
    two_triangles_m1_all: ["two_triangles", 1, 6, 1, 1, 1],
    two_triangles_m2_all: ["two_triangles", 2, 6, 5, 5, 3],
}

#[test]
fn threshold_above_every_degree() {
    // No node can ever be converted, every node must be seeded
    let instance = load("path_5", 3, 5);
    let seeds = greedy_for_instance(&instance).unwrap();
    assert_eq!(5, seeds.number_seeds());
}

#[test]
fn popular_nodes_are_seeded_first() {
    let instance = load("two_triangles", 2, 6);
    let mut seeder = greedy::QuietGreedySeeder::new(instance.graph(), heuristics::popularity::PopularityRanking::default());
    seeder.seed(2, 6).unwrap();
    assert_eq!(vec![NodeIndex(2), NodeIndex(3), NodeIndex(0), NodeIndex(1), NodeIndex(4)], seeder.seeding_order());
}
