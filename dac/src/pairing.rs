//! Batched evaluation of pairing products.
//!
//! Verifying a proof or a chain of signatures needs one pairing product `e(a_1, b_1) * e(a_2, b_2) * ...` per
//! check, and the checks are laid out as a matrix indexed by `(i, j)`. Each cell is evaluated independently,
//! in parallel when the `parallel` feature is enabled and the evaluator is in `ExecutionMode::Parallel`, and
//! the result is tagged with its coordinates. Results are collected by tag, so the order in which cells finish
//! never matters and both modes give the same results.

use crate::{error::DacError, group::GroupElement};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ff::Zero;
use ark_std::{
    collections::{BTreeMap, BTreeSet},
    end_timer, start_timer,
    vec::Vec,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One multiplicand `e(a, b)` of a pairing product
#[derive(Clone, Debug)]
pub struct PairingArgument<E: Pairing> {
    pub a: E::G1Prepared,
    pub b: E::G2Prepared,
}

/// Pairing product to evaluate for the check at `(i, j)`
#[derive(Clone, Debug)]
pub struct PairingCell<E: Pairing> {
    pub i: usize,
    pub j: usize,
    pub arguments: Vec<PairingArgument<E>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One task per cell
    #[default]
    Parallel,
    /// Cells are evaluated one after the other on the calling thread
    Sequential,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairingEvaluator {
    mode: ExecutionMode,
}

/// Products keyed by the coordinates of their cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairingResults<E: Pairing>(BTreeMap<(usize, usize), PairingOutput<E>>);

impl<E: Pairing> PairingArgument<E> {
    pub fn new(a: impl Into<E::G1Prepared>, b: impl Into<E::G2Prepared>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Argument from one element of each group, given in either order
    pub fn from_elements(x: &GroupElement<E>, y: &GroupElement<E>) -> Result<Self, DacError> {
        match (x, y) {
            (GroupElement::G1(a), GroupElement::G2(b)) | (GroupElement::G2(b), GroupElement::G1(a)) => {
                Ok(Self::new(*a, *b))
            }
            _ => Err(DacError::PairingArgumentNeedsBothGroups),
        }
    }
}

impl<E: Pairing> PairingCell<E> {
    pub fn new(i: usize, j: usize, arguments: Vec<PairingArgument<E>>) -> Self {
        Self { i, j, arguments }
    }

    pub fn push(&mut self, argument: PairingArgument<E>) {
        self.arguments.push(argument)
    }

    /// Evaluate the product. An empty cell evaluates to the identity.
    pub fn into_tagged_product(self) -> ((usize, usize), PairingOutput<E>) {
        let t = start_timer!(|| "Pairing product of one cell");
        let (a, b): (Vec<_>, Vec<_>) = self.arguments.into_iter().map(|p| (p.a, p.b)).unzip();
        let product = E::multi_pairing(a, b);
        end_timer!(t);
        ((self.i, self.j), product)
    }
}

impl PairingEvaluator {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Evaluate every cell and return the products by coordinates. Coordinates must be unique, this is checked
    /// before any pairing is computed.
    pub fn evaluate<E: Pairing>(
        &self,
        cells: Vec<PairingCell<E>>,
    ) -> Result<PairingResults<E>, DacError> {
        let mut coordinates = BTreeSet::new();
        for cell in &cells {
            if !coordinates.insert((cell.i, cell.j)) {
                return Err(DacError::DuplicatePairingCell(cell.i, cell.j));
            }
        }

        let t = start_timer!(|| "Evaluating pairing cells");
        let products = match self.mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => cells
                .into_par_iter()
                .map(PairingCell::into_tagged_product)
                .collect::<BTreeMap<_, _>>(),
            _ => cells
                .into_iter()
                .map(PairingCell::into_tagged_product)
                .collect::<BTreeMap<_, _>>(),
        };
        end_timer!(t);
        Ok(PairingResults(products))
    }
}

impl<E: Pairing> PairingResults<E> {
    pub fn get(&self, i: usize, j: usize) -> Option<&PairingOutput<E>> {
        self.0.get(&(i, j))
    }

    /// Whether the product at `(i, j)` is the identity of the target group. `None` if there is no such cell.
    pub fn is_identity(&self, i: usize, j: usize) -> Option<bool> {
        self.get(i, j).map(|p| p.is_zero())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// In order of coordinates
    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &PairingOutput<E>)> {
        self.0.iter()
    }
}
