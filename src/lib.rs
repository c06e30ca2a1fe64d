//! # Simulador de Quantum Dinámico
//! 
//! Esta biblioteca estima, para la planificación Round Robin, el quantum que
//! minimiza el tiempo de espera promedio de una cola de procesos y lo compara
//! con un quantum estático fijo.
//! 
//! ## Características principales
//! 
//! - **Generación de colas**: Construye colas sintéticas de ráfagas con una
//!   forma dada (procesos, tiempo total, ráfaga más larga) a partir de una
//!   fuente aleatoria con semilla.
//! - **Simulación Round Robin**: Reproduce la ejecución por rondas, con una
//!   unidad de cambio de contexto por turno, y calcula la espera promedio.
//! - **Búsqueda del quantum**: Prueba todos los quanta de 1 a la ráfaga más
//!   larga y se queda con el mejor.
//! - **Tabla de quanta**: Precalcula el mejor quantum para cada forma dentro
//!   de unos límites y lo sirve con una política de recorte por eje.
//! 
//! ## Estructura del proyecto
//! 
//! - `generator`: Generación de colas de ráfagas
//! - `scheduler`: Algoritmos de planificación y simulador
//! - `search`: Búsqueda exhaustiva del mejor quantum
//! - `cache`: Tabla tridimensional de quanta
//! - `comparison`: Comparación dinámico vs estático y reportes
//! - `error`: Errores de la biblioteca

pub mod cache;
pub mod comparison;
pub mod error;
pub mod generator;
pub mod scheduler;
pub mod search;

// Re-exportar las estructuras principales para facilitar su uso
pub use cache::{CacheBounds, CellIndex, QuantaCache, QuantumLookup};
pub use comparison::{Comparator, ComparisonReport, QuantumComparison, QueueShape};
pub use error::{Error, Result};
pub use generator::{generate, BurstQueue, GenerationDefect};
pub use scheduler::{average_waiting, fcfs_average_waiting, simulate, Quantum, SchedulingAlgorithm};
pub use search::{best_quantum, search, SearchOutcome};

/// Configuración por defecto del simulador
pub mod config {
    use super::{CacheBounds, Quantum, QueueShape};

    /// Límite del número de procesos en la tabla
    pub const NUM_PROCESSES_BOUND: usize = 20;

    /// Límite del tiempo total de ráfaga en la tabla
    pub const TOTAL_TIME_BOUND: usize = 20;

    /// Límite de la ráfaga más larga en la tabla
    pub const LONGEST_BURST_BOUND: usize = 20;

    /// Quantum estático contra el que se compara
    pub const STATIC_QUANTUM: Quantum = 5;

    /// Semilla por defecto del generador aleatorio
    pub const DEFAULT_SEED: u64 = 42;

    /// Límites por defecto de la tabla de quanta
    pub fn default_bounds() -> CacheBounds {
        CacheBounds::new(NUM_PROCESSES_BOUND, TOTAL_TIME_BOUND, LONGEST_BURST_BOUND)
    }

    /// Formas de cola que se comparan por defecto
    pub fn default_shapes() -> Vec<QueueShape> {
        [
            (4, 19, 4),
            (5, 17, 3),
            (6, 12, 5),
            (7, 13, 2),
            (8, 18, 3),
            (9, 16, 2),
            (16, 19, 3),
            (16, 19, 4),
        ]
        .into_iter()
        .map(|(p, t, l)| QueueShape::new(p, t, l))
        .collect()
    }
}
