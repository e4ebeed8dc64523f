use tessera_core::error::MeshError;
use tessera_core::mesh::{
    expected_index_count, generate_grid, GridMeshGenerator, MAX_TESSELLATION, PRIMITIVE_RESTART,
};

#[test]
fn two_by_two_grid() {
    let mesh = generate_grid(2).unwrap();

    assert_eq!(
        mesh.positions,
        vec![
            [-1.0, 0.0, -1.0],
            [-1.0, 0.0, 1.0],
            [1.0, 0.0, -1.0],
            [1.0, 0.0, 1.0],
        ]
    );
    assert_eq!(mesh.uvs, vec![[0.0, 0.0], [0.0, 0.5], [0.5, 0.0], [0.5, 0.5]]);
    assert_eq!(mesh.indices, vec![0, 2, 1, 3]);
    assert_eq!(mesh.index_count(), 4);
}

#[test]
fn three_by_three_strip_layout() {
    let mesh = generate_grid(3).unwrap();
    assert_eq!(
        mesh.indices,
        vec![0, 3, 1, 4, 2, 5, PRIMITIVE_RESTART, 3, 6, 4, 7, 5, 8]
    );
    let strips: Vec<&[u32]> = mesh.strips().collect();
    assert_eq!(strips.len(), 2);
    assert!(strips.iter().all(|s| s.len() == 6));
}

#[test]
fn rejects_degenerate_tessellation() {
    assert_eq!(generate_grid(0), Err(MeshError::InvalidTessellation(0)));
    assert_eq!(generate_grid(1), Err(MeshError::InvalidTessellation(1)));
}

#[test]
fn rejects_tessellation_overflowing_draw_count() {
    let err = generate_grid(MAX_TESSELLATION + 1).unwrap_err();
    assert!(matches!(err, MeshError::TessellationTooLarge { .. }));
    assert!(expected_index_count(MAX_TESSELLATION) <= u32::MAX as u64);
    assert!(expected_index_count(MAX_TESSELLATION + 1) > u32::MAX as u64);
}

#[test]
fn index_count_matches_buffer_and_formula() {
    for n in 2..=40u32 {
        let mesh = generate_grid(n).unwrap();
        assert_eq!(mesh.index_count() as usize, mesh.indices.len());
        assert_eq!(mesh.index_count() as u64, expected_index_count(n));

        let restarts = mesh.indices.iter().filter(|&&i| i == PRIMITIVE_RESTART).count();
        assert_eq!(restarts as u32, n - 2, "one restart between each pair of strips");
        assert_ne!(mesh.indices.last(), Some(&PRIMITIVE_RESTART));
        assert_ne!(mesh.indices.first(), Some(&PRIMITIVE_RESTART));
    }
}

#[test]
fn vertices_cover_unit_square() {
    for n in [2u32, 3, 7, 16, 65] {
        let mesh = generate_grid(n).unwrap();
        let count = (n * n) as usize;
        assert_eq!(mesh.positions.len(), count);
        assert_eq!(mesh.uvs.len(), count);

        for p in &mesh.positions {
            assert_eq!(p[1], 0.0);
            assert!((-1.0..=1.0).contains(&p[0]));
            assert!((-1.0..=1.0).contains(&p[2]));
        }
        assert_eq!(mesh.positions[0], [-1.0, 0.0, -1.0]);
        assert_eq!(mesh.positions[count - 1], [1.0, 0.0, 1.0]);

        for uv in &mesh.uvs {
            assert!(uv[0] >= 0.0 && uv[0] < 1.0);
            assert!(uv[1] >= 0.0 && uv[1] < 1.0);
        }
    }
}

#[test]
fn indices_reference_valid_vertices() {
    let n = 9;
    let mesh = generate_grid(n).unwrap();
    for strip in mesh.strips() {
        for pair in strip.chunks(2) {
            // each pair joins a vertex with the one directly in the next row
            assert_eq!(pair[1], pair[0] + n);
            assert!(pair[1] < n * n);
        }
    }
}

#[test]
fn vertex_and_uv_share_grid_coordinates() {
    let n = 5;
    let mesh = generate_grid(n).unwrap();
    for row in 0..n {
        for col in 0..n {
            let i = row * n + col;
            let p = mesh.position(i);
            let uv = mesh.uv(i);
            assert!((p.x - (-1.0 + 2.0 * row as f32 / (n - 1) as f32)).abs() < 1e-6);
            assert!((p.z - (-1.0 + 2.0 * col as f32 / (n - 1) as f32)).abs() < 1e-6);
            assert!((uv.x - row as f32 / n as f32).abs() < 1e-6);
            assert!((uv.y - col as f32 / n as f32).abs() < 1e-6);
        }
    }
}

#[test]
fn generator_caches_last_resolution() {
    let mut generator = GridMeshGenerator::new();
    assert_eq!(generator.resolution(), None);

    let first = generator.generate(8).unwrap().clone();
    assert_eq!(generator.resolution(), Some(8));
    assert_eq!(generator.generate(8).unwrap(), &first);

    let other = generator.generate(4).unwrap();
    assert_eq!(other.vertex_count(), 16);
    assert_eq!(generator.resolution(), Some(4));
}

#[test]
fn failed_generation_keeps_previous_mesh() {
    let mut generator = GridMeshGenerator::new();
    generator.generate(6).unwrap();

    assert!(generator.generate(1).is_err());
    assert_eq!(generator.resolution(), Some(6));
    assert_eq!(generator.mesh().map(|m| m.vertex_count()), Some(36));
}
