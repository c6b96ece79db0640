use matrix_mul::{
    BooleanMultiplier, Error, Execution, FourRussiansMultiplier, Matrix, Multiplier,
    StandardMultiplier, StrassenMultiplier,
};

fn int_matrix(rows: Vec<Vec<i64>>) -> Matrix<i64> {
    Matrix::from_rows(rows).unwrap()
}

fn bool_matrix(rows: Vec<Vec<u8>>) -> Matrix<bool> {
    Matrix::from_rows(rows).unwrap().map(|&v| v != 0)
}

#[test]
fn test_standard_multiply() {
    let a = int_matrix(vec![vec![1, 2, 3], vec![1, 2, 3], vec![3, 4, 5]]);
    let b = int_matrix(vec![vec![5, 6, 4], vec![3, 4, 5], vec![7, 8, 2]]);

    let c = StandardMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(
        c.to_rows(),
        vec![vec![32, 38, 18], vec![32, 38, 18], vec![66, 82, 42]]
    );
}

#[test]
fn test_boolean_and_four_russians_multiply() {
    let a = bool_matrix(vec![
        vec![0, 1, 1, 1],
        vec![0, 1, 0, 0],
        vec![1, 1, 0, 1],
        vec![1, 0, 0, 1],
    ]);
    let b = bool_matrix(vec![
        vec![1, 0, 0, 1],
        vec![0, 0, 1, 1],
        vec![1, 0, 1, 0],
        vec![0, 1, 0, 1],
    ]);
    let expected = bool_matrix(vec![
        vec![1, 1, 1, 1],
        vec![0, 0, 1, 1],
        vec![1, 1, 0, 1],
        vec![1, 1, 0, 1],
    ]);

    assert_eq!(BooleanMultiplier::new().multiply(&a, &b).unwrap(), expected);
    assert_eq!(BooleanMultiplier::exhaustive().multiply(&a, &b).unwrap(), expected);
    assert_eq!(FourRussiansMultiplier::new().multiply(&a, &b).unwrap(), expected);
    assert_eq!(
        FourRussiansMultiplier::new()
            .with_execution(Execution::Parallel)
            .multiply(&a, &b)
            .unwrap(),
        expected
    );
}

#[test]
fn test_strassen_multiply() {
    let a = int_matrix(vec![vec![1, 2], vec![3, 4]]);
    let b = int_matrix(vec![vec![5, 6], vec![7, 8]]);

    let c = StrassenMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
}

#[test]
fn test_strassen_pads_and_truncates() {
    let a = int_matrix(vec![vec![1, 2, 3], vec![1, 2, 3], vec![3, 4, 5]]);
    let b = int_matrix(vec![vec![5, 6, 4], vec![3, 4, 5], vec![7, 8, 2]]);

    let c = StrassenMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(c.shape(), (3, 3));
    assert_eq!(c, StandardMultiplier::new().multiply(&a, &b).unwrap());
}

#[test]
fn test_strassen_rectangular_operands() {
    let a = int_matrix(vec![vec![1, 0, -2, 4, 3]]);
    let b = int_matrix(vec![vec![2, 1], vec![7, 0], vec![1, 1], vec![0, 5], vec![-1, 2]]);

    let c = StrassenMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(c.to_rows(), vec![vec![-3, 25]]);
}

#[test]
fn test_shape_mismatch_is_rejected_by_every_multiplier() {
    let a = Matrix::<i64>::zeros(2, 3).unwrap();
    let b = Matrix::<i64>::zeros(2, 3).unwrap();
    let expected = Err(Error::ShapeMismatch(2, 3, 2, 3));

    assert_eq!(StandardMultiplier::new().multiply(&a, &b), expected);
    assert_eq!(StrassenMultiplier::new().multiply(&a, &b), expected);

    let a = Matrix::<bool>::zeros(2, 3).unwrap();
    let b = Matrix::<bool>::zeros(2, 3).unwrap();
    let expected = Err(Error::ShapeMismatch(2, 3, 2, 3));

    assert_eq!(BooleanMultiplier::new().multiply(&a, &b), expected);
    assert_eq!(FourRussiansMultiplier::new().multiply(&a, &b), expected);
}

#[test]
fn test_inputs_are_not_modified() {
    let a = int_matrix(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    let b = int_matrix(vec![vec![9, 8, 7], vec![6, 5, 4], vec![3, 2, 1]]);
    let (a_before, b_before) = (a.clone(), b.clone());

    StrassenMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn test_four_russians_builds_one_table_per_block() {
    let n = 13;
    let a = Matrix::from_vec(n, n, (0..n * n).map(|x| x % 3 == 0).collect()).unwrap();
    let b = Matrix::from_vec(n, n, (0..n * n).map(|x| x % 5 == 1).collect()).unwrap();

    let (result, stats) = FourRussiansMultiplier::new()
        .multiply_with_stats(&a, &b)
        .unwrap();

    // floor(log2 13) + 1 = 4, so 13 columns split into 4 + 4 + 4 + 1.
    assert_eq!(stats.block_width, 4);
    assert_eq!(stats.blocks, 4);
    assert_eq!(stats.tables_built, stats.blocks);
    assert_eq!(stats.lookups, stats.blocks * n * n);
    assert_eq!(result, BooleanMultiplier::new().multiply(&a, &b).unwrap());

    let (_, parallel) = FourRussiansMultiplier::new()
        .with_execution(Execution::Parallel)
        .multiply_with_stats(&a, &b)
        .unwrap();
    assert_eq!(parallel, stats);
}

#[test]
fn test_four_russians_block_width_is_clamped() {
    let a = bool_matrix(vec![vec![1, 0], vec![0, 1]]);
    let b = bool_matrix(vec![vec![0, 1], vec![1, 0]]);

    let (result, stats) = FourRussiansMultiplier::new()
        .with_block_width(8)
        .unwrap()
        .multiply_with_stats(&a, &b)
        .unwrap();

    assert_eq!(stats.block_width, 2);
    assert_eq!(stats.tables_built, 1);
    assert_eq!(result, b);
}

#[test]
fn test_multiplier_names() {
    assert_eq!(StandardMultiplier::<i64>::new().name(), "standard");
    assert_eq!(BooleanMultiplier::new().name(), "boolean");
    assert_eq!(FourRussiansMultiplier::new().name(), "four-russians");
    assert_eq!(StrassenMultiplier::<i64>::new().name(), "strassen");
}

#[test]
fn test_strassen_unsigned_operands() {
    let a = Matrix::from_rows(vec![vec![1u32, 2], vec![3, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5u32, 6], vec![7, 8]]).unwrap();

    let c = StrassenMultiplier::new().multiply(&a, &b).unwrap();

    assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
    assert_eq!(c, StandardMultiplier::new().multiply(&a, &b).unwrap());
}

#[test]
fn test_strassen_unsigned_non_power_of_two() {
    let a = Matrix::from_rows(vec![vec![1u8, 2, 3], vec![1, 2, 3], vec![3, 4, 5]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5u8, 6, 4], vec![3, 4, 5], vec![7, 8, 2]]).unwrap();

    for leaf_size in [1, 2, 4] {
        let c = StrassenMultiplier::new()
            .with_leaf_size(leaf_size)
            .multiply(&a, &b)
            .unwrap();
        assert_eq!(
            c.to_rows(),
            vec![vec![32, 38, 18], vec![32, 38, 18], vec![66, 82, 42]]
        );
    }
}

#[test]
fn test_strassen_large_intermediates() {
    let x = i64::MAX / 2 + 1;
    let a = int_matrix(vec![vec![x, 0], vec![0, x]]);
    let identity = int_matrix(vec![vec![1, 0], vec![0, 1]]);

    let expected = StandardMultiplier::new().multiply(&a, &identity).unwrap();
    assert_eq!(expected, a);
    assert_eq!(StrassenMultiplier::new().multiply(&a, &identity).unwrap(), expected);
    assert_eq!(StrassenMultiplier::new().multiply(&identity, &a).unwrap(), expected);

    let b = int_matrix(vec![vec![i64::MAX, i64::MIN], vec![-1, 1]]);
    assert_eq!(
        StrassenMultiplier::new().multiply(&identity, &b).unwrap(),
        StandardMultiplier::new().multiply(&identity, &b).unwrap()
    );
}

#[test]
fn test_strassen_parallel_above_cutoff() {
    let n = 70;
    let a = Matrix::from_vec(n, n, (0..n * n).map(|x| (x % 11) as i64 - 5).collect()).unwrap();
    let b = Matrix::from_vec(n, n, (0..n * n).map(|x| (x % 7) as i64 - 3).collect()).unwrap();
    assert!(matrix_mul::strassen::padded_size(&a, &b) >= matrix_mul::strassen::PARALLEL_CUTOFF);

    let expected = StandardMultiplier::new().multiply(&a, &b).unwrap();
    let parallel = StrassenMultiplier::new()
        .with_leaf_size(8)
        .with_execution(Execution::Parallel)
        .multiply(&a, &b)
        .unwrap();

    assert_eq!(parallel, expected);
}
