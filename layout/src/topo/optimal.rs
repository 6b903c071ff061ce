//! This module assigns layers by solving a linear program that minimizes the
//! total length of the edges, which is the same as minimizing the number of
//! dummy nodes that the edges need. Every node gets a depth variable. For
//! each edge the target must sit at least one full layer below the source,
//! and the objective is the sum of the depth differences over all edges.
//! The constraint matrix is an incidence matrix, so the relaxation has an
//! integral optimum and rounding it is enough.

use crate::adt::dag::DAG;
use crate::error::{LayoutError, Result};
use good_lp::{
    variable, Expression, IntoAffineExpression, ProblemVariables, Solution,
    SolverModel, Variable,
};

/// The required depth difference along an edge. It is slightly larger than
/// one so that rounding the solution can never close a gap.
const MIN_GAP: f64 = 1.0 + 1e-6;

/// The result of the optimization.
#[derive(Debug, Clone)]
pub struct OptimalLayers {
    /// The layer of each node, indexed by node. Sources are above targets.
    pub layers: Vec<usize>,
    /// The value of the objective that the solver reported.
    pub objective: f64,
}

pub struct DummyMinimizer<'a> {
    dag: &'a DAG,
}

impl<'a> DummyMinimizer<'a> {
    pub fn new(dag: &'a DAG) -> Self {
        Self { dag }
    }

    /// Solve the relaxation and return the integer depth of each node.
    fn solve_depths(&self) -> Result<(Vec<i64>, f64)> {
        let n = self.dag.len();
        let mut vars = ProblemVariables::new();
        let depth: Vec<Variable> = (0..n)
            .map(|_| vars.add(variable().min(0).max(n as f64)))
            .collect();

        let mut objective: Expression = 0.into();
        let mut constraints = Vec::with_capacity(self.dag.num_edges());
        for (from, to) in self.dag.edges() {
            let src = depth[from.get_index()];
            let dst = depth[to.get_index()];
            objective += dst;
            objective -= src;
            constraints.push((dst.into_expression() - src).geq(MIN_GAP));
        }

        let mut model = vars
            .minimise(objective.clone())
            .using(good_lp::solvers::microlp::microlp);
        for c in constraints {
            model.add_constraint(c);
        }

        let solution = model
            .solve()
            .map_err(|err| LayoutError::Solver(err.to_string()))?;

        let value = objective.eval_with(&solution);
        let depths = depth
            .iter()
            .map(|v| solution.value(*v).round() as i64)
            .collect();
        Ok((depths, value))
    }

    /// Compute the layer of every node.
    pub fn optimize(&self) -> Result<OptimalLayers> {
        #[cfg(feature = "log")]
        log::info!(
            "Minimizing the edge length of {} nodes and {} edges.",
            self.dag.len(),
            self.dag.num_edges()
        );

        if self.dag.is_empty() {
            return Ok(OptimalLayers {
                layers: Vec::new(),
                objective: 0.,
            });
        }

        let (depths, objective) = self.solve_depths()?;

        // Make sure that rounding did not break any of the constraints.
        for (from, to) in self.dag.edges() {
            let gap = depths[to.get_index()] - depths[from.get_index()];
            if gap < 1 {
                return Err(LayoutError::Solver(format!(
                    "the edge {} -> {} spans {} layers after rounding",
                    from.get_index(),
                    to.get_index(),
                    gap
                )));
            }
        }

        // Shift the depths to start at zero, and flip them so that the sinks
        // end up in layer zero.
        let max = depths.iter().copied().max().unwrap_or(0);
        let layers: Vec<usize> = depths.iter().map(|d| (max - d) as usize).collect();

        #[cfg(feature = "log")]
        log::info!(
            "The solver found a layering with {} layers and objective {}.",
            layers.iter().max().map_or(0, |l| l + 1),
            objective
        );

        Ok(OptimalLayers { layers, objective })
    }
}

#[cfg(test)]
fn total_span(edges: &[(usize, usize)], layers: &[usize]) -> usize {
    edges.iter().map(|&(a, b)| layers[a] - layers[b]).sum()
}

#[test]
fn test_diamond() {
    let edges = [(0, 1), (0, 2), (1, 3), (2, 3)];
    let dag = DAG::from_edges(4, &edges).unwrap();
    let res = DummyMinimizer::new(&dag).optimize().unwrap();
    assert_eq!(res.layers, vec![2, 1, 1, 0]);
    assert!((res.objective - 4.).abs() < 0.01);
    assert_eq!(total_span(&edges, &res.layers), 4);
}

#[test]
fn test_sinks_a_short_branch() {
    // The longest path decides the height, and the short branch 0 -> 4 -> 3
    // should not stretch.
    let edges = [(0, 1), (1, 2), (2, 3), (0, 4), (4, 3)];
    let dag = DAG::from_edges(5, &edges).unwrap();
    let res = DummyMinimizer::new(&dag).optimize().unwrap();
    for &(a, b) in edges.iter() {
        assert!(res.layers[a] > res.layers[b]);
    }
    assert_eq!(total_span(&edges, &res.layers), 6);
}

#[test]
fn test_empty_graph() {
    let dag = DAG::new();
    let res = DummyMinimizer::new(&dag).optimize().unwrap();
    assert!(res.layers.is_empty());
}
