use numerics::{
    Complex, ComplexMatrix, Decimal, DecimalMatrix, Field, GenericMatrix, Matrix, MatrixError,
    DEFAULT_TOLERANCE,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Random matrices made non-singular by a dominant diagonal
fn random_invertible<T: Field, F: FnMut() -> T>(n: usize, shift: T, mut f: F) -> GenericMatrix<T> {
    GenericMatrix::from_fn(n, n, |r, c| if r == c { f() + shift } else { f() }).unwrap()
}

fn check_round_trip<T: Field>(a: &GenericMatrix<T>) {
    let n = a.nrows();
    let eye = GenericMatrix::eye(n).unwrap();
    let inv = a.inverse().unwrap();
    assert!((a * &inv).approx_eq(&eye, DEFAULT_TOLERANCE), "A * inv(A) = {}", a * &inv);
    assert!((&inv * a).approx_eq(&eye, DEFAULT_TOLERANCE));
    assert!(inv.inverse().unwrap().approx_eq(a, DEFAULT_TOLERANCE));
    assert!((a ^ -1).approx_eq(&inv, DEFAULT_TOLERANCE));
}

fn check_lu<T: Field>(a: &GenericMatrix<T>) {
    let lu = a.lu().unwrap().expect("matrix should not be singular");
    let n = a.nrows();
    for r in 0..n {
        assert!(lu.lower.at(r, r) == T::one());
        for c in r + 1..n {
            assert!(lu.lower.at(r, c).is_zero());
            assert!(lu.upper.at(c, r).is_zero());
        }
    }
    let p = GenericMatrix::from_buffer(lu.permutation);
    let l = GenericMatrix::from_buffer(lu.lower);
    let u = GenericMatrix::from_buffer(lu.upper);
    assert!((&p * a).approx_eq(&(&l * &u), DEFAULT_TOLERANCE));
}

#[test]
fn scenario() {
    let a = Matrix::from_rows(&[[4., 3.], [6., 3.]]).unwrap();
    assert_eq!(a.determinant().unwrap(), -6.);
    let inv = a.inverse().unwrap();
    let expected = Matrix::from_rows(&[[-0.5, 0.5], [1., -2. / 3.]]).unwrap();
    assert!(inv.approx_eq(&expected, 1e-9));
    assert!((&a ^ -1).approx_eq(&inv, 1e-12));
}

#[test]
fn round_trip_real() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=8 {
        let a = random_invertible(n, n as f64, || rng.gen_range(-1.0..1.0));
        check_round_trip(&a);
        check_lu(&a);
    }

    // Pivoting is needed for these
    let a = Matrix::from_rows(&[[0., 2., 1.], [1., 1., 0.], [3., 0., 1.]]).unwrap();
    check_round_trip(&a);
    check_lu(&a);
}

#[test]
fn round_trip_complex() {
    let mut rng = StdRng::seed_from_u64(5);
    for n in 1..=6 {
        let a = random_invertible(n, Complex::new(n as f64, 0.), || {
            Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        });
        check_round_trip(&a);
        check_lu(&a);
    }
}

#[test]
fn round_trip_decimal() {
    let mut rng = StdRng::seed_from_u64(9);
    for n in 1..=5 {
        let a = random_invertible(n, Decimal::new(n as i64 * 10, 0), || {
            Decimal::new(rng.gen_range(-90..=90), 1)
        });
        check_round_trip(&a);
        check_lu(&a);
    }
}

#[test]
fn inverse_and_permutation() {
    let a = Matrix::from_rows(&[[0., 1.], [1., 0.]]).unwrap();
    let (inv, p) = a.inverse_with_permutation().unwrap();
    assert_eq!(p, a);
    assert_eq!(inv, a);

    let pa_inv = (&p * &a).inverse().unwrap();
    assert_eq!(&pa_inv * &p, inv);
}

#[test]
fn singular_matrices() {
    let a = Matrix::from_rows(&[[1., 2., 3.], [2., 4., 6.], [0., 1., 1.]]).unwrap();
    assert!(matches!(
        a.inverse(),
        Err(MatrixError::SingularMatrix { .. })
    ));
    assert!(a.lu().unwrap().is_none());
    assert!(a.solve(&Matrix::new(1., 3, 1).unwrap()).is_err());

    let zeros = ComplexMatrix::zeros(2, 2).unwrap();
    assert_eq!(
        zeros.inverse(),
        Err(MatrixError::SingularMatrix { column: 0 })
    );
    assert!(zeros.lu().unwrap().is_none());

    let rect = DecimalMatrix::zeros(2, 3).unwrap();
    assert!(matches!(
        rect.inverse(),
        Err(MatrixError::NonSquareMatrix { .. })
    ));
}

#[test]
fn solve_random_systems() {
    let mut rng = StdRng::seed_from_u64(123);
    for n in 1..=6 {
        let a = random_invertible(n, 2. * n as f64, || rng.gen_range(-1.0..1.0));
        let x = Matrix::from_fn(n, 2, |_, _| rng.gen_range(-10.0..10.0)).unwrap();
        let b = &a * &x;
        let solved = a.solve(&b).unwrap();
        assert!(solved.approx_eq(&x, 1e-9));

        // Diagonally dominant, so Gauss-Seidel converges too
        let b0 = b.col(0).unwrap();
        let mut guess = Matrix::zeros(n, 1).unwrap();
        a.gauss_seidel(&b0, &mut guess, 200, 1e-13).unwrap();
        assert!(guess.approx_eq(&x.col(0).unwrap(), 1e-9));
    }
}
