use numerics::{
    Complex, ComplexMatrix, DecimalMatrix, Decimal, Element, GenericMatrix, LongMatrix, Matrix,
    MatrixError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_long(rng: &mut StdRng, nrows: usize, ncols: usize) -> LongMatrix {
    LongMatrix::from_fn(nrows, ncols, |_, _| rng.gen_range(-9..=9)).unwrap()
}

fn check_transpose<T: Element>(m: &GenericMatrix<T>) {
    let t = m.transpose();
    assert_eq!(t.size(), (m.ncols(), m.nrows()));
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            assert!(m.at(r, c) == t.at(c, r));
        }
    }
    assert!(&t.transpose() == m);
}

#[test]
fn transpose_involution() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..20 {
        let nrows = rng.gen_range(1..8);
        let ncols = rng.gen_range(1..8);

        check_transpose(&random_long(&mut rng, nrows, ncols));
        check_transpose(
            &Matrix::from_fn(nrows, ncols, |_, _| rng.gen_range(-1.0..1.0)).unwrap(),
        );
        check_transpose(
            &ComplexMatrix::from_fn(nrows, ncols, |_, _| {
                Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
            })
            .unwrap(),
        );
        check_transpose(
            &DecimalMatrix::from_fn(nrows, ncols, |_, _| {
                Decimal::new(rng.gen_range(-999..=999), 2)
            })
            .unwrap(),
        );
    }
}

#[test]
fn concatenation_round_trip() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        let (n_a, n_b, ncols) = (rng.gen_range(1..6), rng.gen_range(1..6), rng.gen_range(1..6));
        let a = random_long(&mut rng, n_a, ncols);
        let b = random_long(&mut rng, n_b, ncols);
        let joined = a.concat_rows(&b).unwrap();
        assert_eq!(joined.nrows(), n_a + n_b);
        assert_eq!(joined.split_rows(n_a).unwrap(), (a, b));

        let (nrows, m_a, m_b) = (rng.gen_range(1..6), rng.gen_range(1..6), rng.gen_range(1..6));
        let a = random_long(&mut rng, nrows, m_a);
        let b = random_long(&mut rng, nrows, m_b);
        let joined = a.concat_cols(&b).unwrap();
        assert_eq!(joined.ncols(), a.ncols() + b.ncols());
        assert_eq!(joined.split_cols(a.ncols()).unwrap(), (a, b));
    }
}

#[test]
fn concatenation_shapes() {
    let a = Matrix::eye(2).unwrap();

    // Same number of columns: rows are stacked
    let b = Matrix::new(3., 3, 2).unwrap();
    assert_eq!(a.concat(&b).unwrap().size(), (5, 2));

    // Same number of rows: columns are stacked
    let b = Matrix::new(3., 2, 3).unwrap();
    assert_eq!(a.concat(&b).unwrap().size(), (2, 5));

    // Both: rows win
    let b = Matrix::new(3., 2, 2).unwrap();
    assert_eq!(a.concat(&b).unwrap().size(), (4, 2));

    // Neither
    let b = Matrix::new(3., 3, 3).unwrap();
    assert_eq!(
        a.concat(&b),
        Err(MatrixError::IncompatibleConcatenation {
            lhs: (2, 2),
            rhs: (3, 3)
        })
    );
}

#[test]
fn arithmetic_scenarios() {
    let a = Matrix::from_rows(&[[1., 2.], [3., 4.]]).unwrap();
    let b = Matrix::from_rows(&[[5., 6.], [7., 8.]]).unwrap();
    assert_eq!(&a * &b, Matrix::from_rows(&[[19., 22.], [43., 50.]]).unwrap());
    assert_eq!(&a + &b, Matrix::from_rows(&[[6., 8.], [10., 12.]]).unwrap());

    let a = LongMatrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
    let b = LongMatrix::from_rows(&[[5, 6], [7, 8]]).unwrap();
    assert_eq!(&a * &b, LongMatrix::from_rows(&[[19, 22], [43, 50]]).unwrap());
}

#[test]
fn powers() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in 1..6 {
        let a = random_long(&mut rng, n, n);
        assert_eq!(a.pow(0).unwrap(), LongMatrix::eye(n).unwrap());
        assert_eq!(a.pow(1).unwrap(), a);
        assert_eq!(a.pow(2).unwrap(), &a * &a);
        assert_eq!(a.pow(3).unwrap(), &(&a * &a) * &a);

        let real = Matrix::from_fn(n, n, |r, c| a.at(r, c) as f64).unwrap();
        assert_eq!(&real ^ 0, Matrix::eye(n).unwrap());
        assert_eq!(&real ^ 2, &real * &real);
    }
}

#[test]
fn complex_magnitude() {
    assert_eq!(Complex::new(3., 4.).abs(), 5.);
    assert_eq!(Complex::new(3., 4.).magnitude(), 5.);

    let big = Complex::new(1e200, 1e200);
    assert!(big.abs().is_finite());
    assert!((big.abs() / 1e200 - 2f64.sqrt()).abs() < 1e-12);

    // Pivots are chosen by magnitude
    let m = ComplexMatrix::from_rows(&[
        [Complex::new(1., 1.), Complex::ONE],
        [Complex::new(0., 3.), Complex::ONE],
    ])
    .unwrap();
    let tri = m.triangle().unwrap();
    assert_eq!(tri.upper.at(0, 0), Complex::new(0., 3.));
}

#[test]
fn serde_round_trip() {
    let m = DecimalMatrix::from_rows(&[
        [Decimal::new(15, 1), Decimal::ONE],
        [Decimal::NEGATIVE_ONE, Decimal::new(-25, 2)],
    ])
    .unwrap();
    let json = serde_json::to_string(&m).unwrap();
    let back: DecimalMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);

    let c = ComplexMatrix::from_rows(&[[Complex::I, Complex::new(1.5, -2.)]]).unwrap();
    let json = serde_json::to_string(&c).unwrap();
    let back: ComplexMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);

    // Shapes are validated when reading
    let bad = r#"{"nrows":2,"ncols":2,"data":[1.0,2.0,3.0]}"#;
    assert!(serde_json::from_str::<Matrix>(bad).is_err());
}
