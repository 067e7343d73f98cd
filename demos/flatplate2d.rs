// cargo run --example flatplate2d [output.vtk]
//
// Laminar flat plate: a plate along y = 0 for x in [0, 2], with a free-stream
// inflow region in front of it. Cells are graded towards the plate.
use block_mesher::prelude::*;

fn main() -> Result<(), MeshError> {
    let mut b = BlockMeshBuilder::new(2)?;
    let points = [
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 0.2],
        [1.0, 0.2],
        [0.0, 1.1],
        [1.0, 1.2],
        [2.0, 0.0],
        [2.0, 0.2],
        [2.0, 1.3],
        [-1.0, 0.0],
        [-1.0, 0.2],
        [-1.0, 1.0],
    ];
    for (id, xy) in (0u32..).zip(points) {
        b.add_point(id, xy)?;
    }

    let near_wall = [
        EdgeGrading::UNIFORM,
        EdgeGrading::UNIFORM,
        EdgeGrading::Ratio(5.0),
        EdgeGrading::Ratio(5.0),
    ];
    let far_field = [
        EdgeGrading::UNIFORM,
        EdgeGrading::UNIFORM,
        EdgeGrading::Ratio(10.0),
        EdgeGrading::Ratio(10.0),
    ];
    b.add_block(0, &[0, 1, 3, 2], &[20, 10], &near_wall)?;
    b.add_block(1, &[2, 3, 5, 4], &[20, 10], &far_field)?;
    b.add_block(2, &[1, 6, 7, 3], &[20, 10], &near_wall)?;
    b.add_block(3, &[3, 7, 8, 5], &[20, 10], &far_field)?;
    b.add_block(4, &[9, 0, 2, 10], &[20, 10], &near_wall)?;
    b.add_block(5, &[10, 2, 4, 11], &[20, 10], &far_field)?;

    b.add_patch("inlet", &[&[10, 9], &[11, 10]])?;
    b.add_patch("bottom1", &[&[0, 1]])?;
    b.add_patch("bottom2", &[&[1, 6]])?;
    b.add_patch("bottom3", &[&[9, 0]])?;
    b.add_patch("outlet", &[&[6, 7], &[7, 8]])?;
    b.add_patch("top", &[&[5, 4], &[8, 5], &[4, 11]])?;

    let options = GenerationOptions {
        unpatched: UnpatchedFaces::Error,
        ..Default::default()
    };
    let mesh = generate_with(&b.build()?, &options)?;
    mesh.debug_assert_invariants();

    let stats = mesh.statistics();
    println!(
        "{} points, {} cells, {} boundary faces, area {:.4}, max aspect ratio {:.2}",
        stats.points, stats.cells, stats.boundary_faces, stats.total_measure, stats.max_aspect_ratio
    );
    for (name, faces) in &stats.patch_faces {
        println!("  {name}: {faces} faces");
    }

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "flatplate2d.vtk".to_string());
    VtkWriter::default().write_file(&path, &mesh)?;
    println!("wrote {path}");
    Ok(())
}
