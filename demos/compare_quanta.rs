//! Ejemplo básico: quantum dinámico vs varios quanta estáticos

use rand::rngs::StdRng;
use rand::SeedableRng;

use dynamic_quantum_simulator::{
    config, fcfs_average_waiting, search, Comparator, QuantaCache, QueueShape,
};

fn main() {
    println!("=== Ejemplo: Quantum dinámico vs estático ===\n");

    let mut rng = StdRng::seed_from_u64(config::DEFAULT_SEED);

    println!("1. Construyendo la tabla de quanta ({})...", config::default_bounds());
    let cache = QuantaCache::populate(config::default_bounds(), &mut rng)
        .expect("No se pudo construir la tabla de quanta");

    // Comparar la tabla contra tres quanta estáticos distintos
    let shapes = config::default_shapes();
    for static_quantum in [1, 3, 5] {
        println!("\n2. Comparando con quantum estático {}...", static_quantum);
        let report = Comparator::new(&cache, static_quantum)
            .compare_all(&shapes, &mut rng)
            .expect("La comparación falló");
        println!("{}", report.render());
    }

    // Para una cola concreta, el óptimo real frente al valor de la tabla
    println!("\n3. Óptimo exacto frente a la tabla para una cola concreta");
    let shape = QueueShape::new(6, 12, 5);
    let queue = dynamic_quantum_simulator::generate(
        shape.num_processes,
        shape.total_time,
        shape.longest_burst,
        &mut rng,
    );
    let exact = search(&queue).expect("La búsqueda falló");
    let cached = cache.lookup(6, 12, 5);

    println!("| Cola                | {}", queue);
    println!("| Quantum exacto      | {} ({:.3})", exact.quantum, exact.average_waiting);
    println!("| Quantum de la tabla | {}", cached);
    println!(
        "| FCFS                | {:.3}",
        fcfs_average_waiting(&queue).expect("La simulación FCFS falló")
    );
}
