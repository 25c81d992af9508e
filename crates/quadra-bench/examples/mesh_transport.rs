//! Stream a handful of particles through a plane mesh and print their
//! histories. A minimal picture of what a host transport loop does with
//! the engine.

use quadra_bench::{random_direction, random_position};
use quadra_geometry::Status;
use quadra_test_utils::mesh_geometry;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let side = 4u32;
    let mut geometry = mesh_geometry(side);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for history in 0..5 {
        let mut position = random_position(&mut rng, f64::from(side));
        let direction = random_direction(&mut rng);
        let mut cell = geometry.find_cell(position).unwrap();

        println!(
            "history {history}: start [{:.3}, {:.3}, {:.3}] direction [{:+.3}, {:+.3}, {:+.3}]",
            position.x, position.y, position.z, direction.x, direction.y, direction.z
        );

        loop {
            let (crossing, distance) = geometry
                .find_new_cell_from(position, direction, cell)
                .unwrap();
            println!(
                "  crossed after {distance:.6} into cell {} ({:?})",
                geometry.cell_user_id(crossing.cell),
                crossing.status
            );
            if crossing.status == Status::DeadCell {
                break;
            }
            position = crossing.position;
            cell = crossing.cell;
        }
    }

    println!(
        "{} cells, {} unmatched faces remaining",
        geometry.num_cells(),
        geometry.unmatched_faces()
    );
}
