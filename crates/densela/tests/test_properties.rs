//! Property tests for algebraic and aliasing invariants.

use densela::{Matrix, Vector};
use proptest::{prelude::*, test_runner::Config};

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6
}

fn vector_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (0usize..32).prop_flat_map(|n| {
        (
            prop::collection::vec(finite(), n),
            prop::collection::vec(finite(), n),
        )
    })
}

fn matrix() -> impl Strategy<Value = Matrix> {
    (0usize..6, 0usize..6).prop_flat_map(|(m, n)| {
        prop::collection::vec(finite(), m * n)
            .prop_map(move |data| Matrix::from_vec(data, m, n).unwrap())
    })
}

proptest! {
    #![proptest_config(Config {
            cases: 64,
            ..Default::default()
        })]

    #[test]
    fn zeroed_vector_is_all_zero(n in 0usize..256) {
        prop_assert!(Vector::new(n).iter().all(|x| x == 0.0));
    }

    #[test]
    fn add_then_sub_with_integers_restores((a, b) in (0usize..32).prop_flat_map(|n| {
        (
            prop::collection::vec(-1000i32..1000, n),
            prop::collection::vec(-1000i32..1000, n),
        )
    })) {
        let v: Vector = a.iter().map(|&x| x as f64).collect();
        let w: Vector = b.iter().map(|&x| x as f64).collect();
        prop_assert_eq!(v.add(&w).unwrap().sub(&w).unwrap(), v);
    }

    #[test]
    fn elementwise_add_commutes((a, b) in vector_pair()) {
        let v = Vector::from_vec(a);
        let w = Vector::from_vec(b);
        prop_assert_eq!(v.add(&w).unwrap(), w.add(&v).unwrap());
    }

    #[test]
    fn transpose_is_an_involution(m in matrix()) {
        prop_assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn product_has_outer_shape(m in 0usize..5, n in 0usize..5, p in 0usize..5) {
        let a = Matrix::filled(m, n, 1.0);
        let b = Matrix::filled(n, p, 1.0);
        let c = a.mul(&b).unwrap();
        prop_assert_eq!(c.shape(), (m, p));
        prop_assert!(c.iter().all(|x| x == n as f64));
        if m != p {
            prop_assert!(b.mul(&a).is_err());
        }
    }

    #[test]
    fn full_view_copy_round_trips(m in matrix()) {
        let copy = m.view(0, 0, m.rows(), m.cols()).unwrap().to_matrix();
        prop_assert_eq!(&copy, &m);
    }

    #[test]
    fn row_view_writes_are_visible(m in matrix(), value in finite()) {
        prop_assume!(!m.is_empty());
        let mut row = m.row_view(0).unwrap();
        for j in 0..m.cols() {
            row.set(0, j, value).unwrap();
            prop_assert_eq!(m.get(0, j).unwrap(), value);
        }
    }

    #[test]
    fn slide_down_shifts_rows(m in matrix()) {
        let s = m.slide(1, 0);
        if m.rows() > 0 {
            prop_assert!(s.row(0).unwrap().is_zero());
        }
        for i in 1..m.rows() {
            prop_assert_eq!(s.row(i).unwrap(), m.row(i - 1).unwrap());
        }
    }

    #[test]
    fn wrap_is_periodic(data in prop::collection::vec(finite(), 1..16), k in -64isize..64) {
        let v = Vector::from_vec(data);
        let n = v.len() as isize;
        prop_assert_eq!(v.wrap(k), v.wrap(k + n));
        prop_assert_eq!(v.wrap(k).wrap(-k), v);
    }

    #[test]
    fn max_index_is_first_maximum(data in prop::collection::vec(-5i32..5, 1..20)) {
        let v: Vector = data.iter().map(|&x| x as f64).collect();
        let best = data.iter().copied().max().unwrap();
        let first = data.iter().position(|&x| x == best).unwrap();
        prop_assert_eq!(v.max_index().unwrap(), first);
    }

    #[test]
    fn median_is_middle_quantile(data in prop::collection::vec(finite(), 1..32)) {
        let v = Vector::from_vec(data);
        prop_assert_eq!(v.median().unwrap(), v.quantile(0.5).unwrap());
    }
}
