use std::env;
use std::fmt::Debug;
use std::num::ParseIntError;
use std::str::FromStr;

use matrix_mul::{
    Algorithm, BooleanMultiplier, Error, FourRussiansMultiplier, Matrix, Multiplier,
    StandardMultiplier, StrassenMultiplier,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let algorithm = match args.get(1).map_or(Ok(Algorithm::Standard), |s| s.parse()) {
        Ok(algorithm) => algorithm,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} <algorithm> [m] [k] [n] [seed]", args[0]);
            eprintln!("Algorithms:");
            for algorithm in Algorithm::ALL {
                eprintln!("  {}", algorithm);
            }
            eprintln!("Multiplies a random m×k matrix by a random k×n matrix.");
            std::process::exit(1);
        }
    };

    let m: usize = arg(&args, 2, 4)?;
    let k: usize = arg(&args, 3, 4)?;
    let n: usize = arg(&args, 4, 4)?;
    let seed: u64 = arg(&args, 5, 42)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let max_value = if algorithm.is_boolean() { 1 } else { 9 };
    let a = random_matrix(&mut rng, m, k, max_value)?;
    let b = random_matrix(&mut rng, k, n, max_value)?;

    info!(%algorithm, m, k, n, seed, "multiplying");
    println!("Matrix A ({}x{}):", m, k);
    print_matrix(&a);
    println!("Matrix B ({}x{}):", k, n);
    print_matrix(&b);

    let result = match algorithm {
        Algorithm::Standard => StandardMultiplier::new().multiply(&a, &b)?,
        Algorithm::Strassen => StrassenMultiplier::new().multiply(&a, &b)?,
        Algorithm::Boolean => multiply_boolean(&BooleanMultiplier::new(), &a, &b)?,
        Algorithm::FourRussians => multiply_boolean(&FourRussiansMultiplier::new(), &a, &b)?,
    };

    println!("Result ({}x{}):", m, n);
    print_matrix(&result);

    Ok(())
}

/// Parses the positional argument at `index`, falling back to `default`.
fn arg<T>(args: &[String], index: usize, default: T) -> Result<T, Error>
where
    T: FromStr<Err = ParseIntError>,
{
    Ok(match args.get(index) {
        Some(value) => value.parse()?,
        None => default,
    })
}

fn random_matrix(
    rng: &mut StdRng,
    rows: usize,
    cols: usize,
    max_value: i64,
) -> Result<Matrix<i64>, Error> {
    let data = (0..rows * cols).map(|_| rng.gen_range(0..=max_value)).collect();
    Matrix::from_vec(rows, cols, data)
}

/// Runs a boolean-semiring multiplier on 0/1 integer matrices.
fn multiply_boolean<M>(
    multiplier: &M,
    a: &Matrix<i64>,
    b: &Matrix<i64>,
) -> Result<Matrix<i64>, Error>
where
    M: Multiplier<Element = bool>,
{
    let result = multiplier.multiply(&a.map(|&v| v != 0), &b.map(|&v| v != 0))?;
    Ok(result.map(|&v| i64::from(v)))
}

fn print_matrix<T: Copy + Debug>(matrix: &Matrix<T>) {
    for row in matrix.to_rows() {
        println!("  {:?}", row);
    }
}
