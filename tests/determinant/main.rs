use numerics::{
    Complex, ComplexMatrix, Decimal, DecimalMatrix, Element, GenericMatrix, LongMatrix, Matrix,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Cofactor expansion along the first row
fn laplace<T: Element>(m: &GenericMatrix<T>) -> T {
    (0..m.ncols()).fold(T::zero(), |acc, c| {
        acc + m.at(0, c) * m.adjunct(0, c).unwrap()
    })
}

fn random_matrix(rng: &mut StdRng, n: usize) -> Matrix {
    Matrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0)).unwrap()
}

/// Makes the last row the sum of the first one and the second-to-last one
fn make_singular<T: Element>(m: &mut GenericMatrix<T>) {
    let n = m.nrows();
    if n == 1 {
        m.set(0, 0, T::zero()).unwrap();
        return;
    }
    for c in 0..m.ncols() {
        let v = m.at(0, c) + m.at(n - 2, c);
        m.set(n - 1, c, v).unwrap();
    }
}

fn assert_close(a: f64, b: f64) {
    let tol = 1e-9 * a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() < tol, "{} != {}", a, b);
}

#[test]
fn determinant_consistency_real() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=6 {
        for _ in 0..10 {
            let m = random_matrix(&mut rng, n);
            let det = m.determinant().unwrap();
            assert_close(det, m.determinant_by_lu().unwrap());
            assert_close(det, m.determinant_by_elimination().unwrap());
            assert_close(det, laplace(&m));
            assert_close(det, m.triangle().unwrap().determinant.unwrap());
        }
    }
}

#[test]
fn determinant_consistency_real_singular() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=6 {
        let mut m = random_matrix(&mut rng, n);
        make_singular(&mut m);
        assert_close(m.determinant().unwrap(), 0.0);
        assert_close(m.determinant_by_lu().unwrap(), 0.0);
        assert_close(m.determinant_by_elimination().unwrap(), 0.0);
        assert_close(laplace(&m), 0.0);
    }
}

#[test]
fn determinant_consistency_long() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in 1..=6 {
        for singular in [false, true] {
            let mut m = LongMatrix::from_fn(n, n, |_, _| rng.gen_range(-5..=5)).unwrap();
            if singular {
                make_singular(&mut m);
            }
            let det = m.determinant().unwrap();
            assert_eq!(det, m.determinant_by_elimination().unwrap());
            assert_eq!(det, laplace(&m));
            if singular {
                assert_eq!(det, 0);
            }

            // Same values, as floating point
            let real = Matrix::from_fn(n, n, |r, c| m.at(r, c) as f64).unwrap();
            assert_close(real.determinant_by_lu().unwrap(), det as f64);
        }
    }
}

#[test]
fn determinant_consistency_decimal() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 1..=6 {
        for singular in [false, true] {
            let mut m =
                DecimalMatrix::from_fn(n, n, |_, _| Decimal::new(rng.gen_range(-50..=50), 1))
                    .unwrap();
            if singular {
                make_singular(&mut m);
            }
            let det = m.determinant().unwrap();
            assert_eq!(det, m.determinant_by_elimination().unwrap());
            assert_eq!(det, laplace(&m));
            if singular {
                assert_eq!(det, Decimal::ZERO);
            }
        }
    }
}

#[test]
fn determinant_consistency_complex() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 1..=6 {
        let m = ComplexMatrix::from_fn(n, n, |_, _| {
            Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        })
        .unwrap();
        let det = m.determinant().unwrap();
        assert!(det.approx_eq(&m.determinant_by_lu().unwrap(), 1e-9));
        assert!(det.approx_eq(&m.determinant_by_elimination().unwrap(), 1e-9));
        assert!(det.approx_eq(&laplace(&m), 1e-9));
    }
}

#[test]
fn rank_under_elimination() {
    let m = Matrix::from_rows(&[[1., 2.], [0., 0.]]).unwrap();
    let tri = m.triangle().unwrap();
    assert_eq!(tri.rank, 1);
    assert_eq!(tri.determinant, Some(0.0));
    assert_eq!(m.determinant().unwrap(), 0.0);
}
