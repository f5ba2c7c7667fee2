use ark_bls12_381::{Bls12_381, G1Affine, G2Affine};
use ark_std::{rand::RngCore, UniformRand};
use dac::pairing::{PairingArgument, PairingCell};

/// A `rows x cols` matrix of cells, each a product of `arguments_per_cell` pairings of random points
pub fn random_pairing_cells<R: RngCore>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    arguments_per_cell: usize,
) -> Vec<PairingCell<Bls12_381>> {
    let mut cells = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let arguments = (0..arguments_per_cell)
                .map(|_| PairingArgument::new(G1Affine::rand(rng), G2Affine::rand(rng)))
                .collect();
            cells.push(PairingCell::new(i, j, arguments));
        }
    }
    cells
}
