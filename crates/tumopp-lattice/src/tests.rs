//! Unit tests for lattice topologies.

#[cfg(test)]
mod directions {
    use tumopp_core::Topology;

    use crate::Lattice;

    #[test]
    fn neighbor_counts() {
        let cases = [
            (Topology::Neumann, 2, 4),
            (Topology::Neumann, 3, 6),
            (Topology::Moore, 2, 8),
            (Topology::Moore, 3, 26),
            (Topology::Hex, 2, 6),
            (Topology::Hex, 3, 18),
        ];
        for (topo, dims, expected) in cases {
            let lattice = Lattice::new(topo, dims).unwrap();
            assert_eq!(
                lattice.directions().len(),
                expected,
                "{topo} in {dims}D"
            );
        }
    }

    #[test]
    fn directions_are_distinct_and_nonzero() {
        for topo in [Topology::Neumann, Topology::Moore, Topology::Hex] {
            for dims in [2, 3] {
                let lattice = Lattice::new(topo, dims).unwrap();
                let mut seen = std::collections::HashSet::new();
                for &d in lattice.directions() {
                    assert_ne!(d, crate::Coord::ORIGIN);
                    assert!(seen.insert(d), "duplicate direction {d} in {topo}/{dims}D");
                }
            }
        }
    }

    #[test]
    fn two_dimensional_directions_stay_in_plane() {
        for topo in [Topology::Neumann, Topology::Moore, Topology::Hex] {
            let lattice = Lattice::new(topo, 2).unwrap();
            assert!(lattice.directions().iter().all(|d| d.z() == 0));
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let a = Lattice::new(Topology::Moore, 3).unwrap();
        let b = Lattice::new(Topology::Moore, 3).unwrap();
        assert_eq!(a.directions(), b.directions());
    }

    #[test]
    fn bad_dimensions_rejected() {
        assert!(Lattice::new(Topology::Moore, 1).is_err());
        assert!(Lattice::new(Topology::Moore, 4).is_err());
    }
}

#[cfg(test)]
mod distances {
    use tumopp_core::Topology;

    use crate::{Coord, Lattice};

    #[test]
    fn manhattan_on_neumann() {
        let lattice = Lattice::new(Topology::Neumann, 3).unwrap();
        assert_eq!(lattice.graph_distance(Coord::new(1, -2, 3)), 6);
        assert_eq!(lattice.graph_distance(Coord::ORIGIN), 0);
    }

    #[test]
    fn chebyshev_on_moore() {
        let lattice = Lattice::new(Topology::Moore, 3).unwrap();
        assert_eq!(lattice.graph_distance(Coord::new(1, -2, 3)), 3);
        assert_eq!(lattice.graph_distance(Coord::new(-1, 1, 1)), 1);
    }

    #[test]
    fn hex_axial_distance() {
        let lattice = Lattice::new(Topology::Hex, 2).unwrap();
        assert_eq!(lattice.graph_distance(Coord::new(1, -1, 0)), 1);
        assert_eq!(lattice.graph_distance(Coord::new(2, 0, 0)), 2);
        assert_eq!(lattice.graph_distance(Coord::new(1, 1, 0)), 2);
    }

    #[test]
    fn hex_euclidean_equals_graph() {
        let lattice = Lattice::new(Topology::Hex, 3).unwrap();
        for d in [Coord::new(1, -1, 0), Coord::new(2, 0, 0), Coord::new(0, 0, 1)] {
            assert_eq!(
                lattice.euclidean_distance(d),
                f64::from(lattice.graph_distance(d))
            );
        }
    }

    #[test]
    fn euclidean_on_square_lattices() {
        let lattice = Lattice::new(Topology::Moore, 2).unwrap();
        assert!((lattice.euclidean_distance(Coord::new(3, 4, 0)) - 5.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod sphere {
    use tumopp_core::Topology;

    use crate::{Coord, Lattice};

    #[test]
    fn single_site_is_origin() {
        let lattice = Lattice::new(Topology::Moore, 3).unwrap();
        assert_eq!(lattice.sphere(1), vec![Coord::ORIGIN]);
    }

    #[test]
    fn sites_are_distinct_and_sorted_outward() {
        let lattice = Lattice::new(Topology::Moore, 2).unwrap();
        let sites = lattice.sphere(20);
        assert_eq!(sites.len(), 20);
        let mut seen = std::collections::HashSet::new();
        assert!(sites.iter().all(|&c| seen.insert(c)));
        for pair in sites.windows(2) {
            assert!(
                lattice.euclidean_distance(pair[0]) <= lattice.euclidean_distance(pair[1]),
                "sphere sites must be ordered by distance"
            );
        }
    }

    #[test]
    fn two_dimensional_sphere_stays_in_plane() {
        let lattice = Lattice::new(Topology::Neumann, 2).unwrap();
        assert!(lattice.sphere(9).iter().all(|c| c.z() == 0));
    }
}

#[cfg(test)]
mod sampling {
    use tumopp_core::{SimRng, Topology};

    use crate::{Coord, Lattice};

    #[test]
    fn random_neighbor_is_adjacent() {
        let lattice = Lattice::new(Topology::Hex, 3).unwrap();
        let mut rng = SimRng::new(7);
        let home = Coord::new(2, -1, 4);
        for _ in 0..100 {
            let n = lattice.random_neighbor(home, &mut rng);
            assert!(lattice.directions().contains(&(n - home)));
        }
    }
}
