//! # Módulo de Búsqueda del Quantum
//! 
//! Búsqueda exhaustiva del quantum que minimiza el tiempo de espera promedio
//! de una cola concreta.

use crate::error::Result;
use crate::generator::BurstQueue;
use crate::scheduler::{simulate, Quantum, SchedulingAlgorithm, SimulationOutcome};

/// Mejor quantum encontrado y su tiempo de espera promedio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Quantum ganador
    pub quantum: Quantum,
    /// Suma de esperas con ese quantum
    pub total_waiting: i64,
    /// Tiempo de espera promedio con ese quantum
    pub average_waiting: f64,
}

/// Evalúa todos los quanta de 1 a la ráfaga más larga de la cola.
/// 
/// Gana la menor suma de esperas estrictamente; ante un empate se conserva
/// el quantum más pequeño. Se comparan las sumas enteras para que un empate
/// nunca dependa del redondeo del promedio. Si la ráfaga más larga es menor que 1 no hay
/// nada que evaluar y se devuelve quantum 1 con la espera de ese quantum.
/// 
/// # Errors
/// 
/// Propaga [`Error::EmptyQueue`](crate::Error::EmptyQueue) de la simulación.
pub fn search(queue: &BurstQueue) -> Result<SearchOutcome> {
    let longest = Quantum::try_from(queue.longest().max(1)).unwrap_or(Quantum::MAX);

    let mut best = evaluate(queue, 1)?;

    for quantum in 2..=longest {
        let candidate = evaluate(queue, quantum)?;
        if candidate.total_waiting < best.total_waiting {
            best = candidate;
        }
    }

    Ok(best)
}

fn evaluate(queue: &BurstQueue, quantum: Quantum) -> Result<SearchOutcome> {
    let SimulationOutcome {
        total_waiting,
        average_waiting,
        ..
    } = simulate(queue, &SchedulingAlgorithm::round_robin(quantum))?;

    Ok(SearchOutcome {
        quantum,
        total_waiting,
        average_waiting,
    })
}

/// Quantum que minimiza el tiempo de espera promedio de la cola.
/// 
/// # Examples
/// 
/// ```rust
/// use dynamic_quantum_simulator::{best_quantum, BurstQueue};
/// 
/// let queue = BurstQueue::from(vec![4, 3, 2]);
/// let quantum = best_quantum(&queue).unwrap();
/// assert!((1..=4).contains(&quantum));
/// ```
pub fn best_quantum(queue: &BurstQueue) -> Result<Quantum> {
    search(queue).map(|outcome| outcome.quantum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scheduler::average_waiting;

    fn queue(bursts: &[i64]) -> BurstQueue {
        BurstQueue::from(bursts.to_vec())
    }

    #[test]
    fn test_result_is_minimum_over_range() {
        let q = queue(&[7, 2, 5, 1, 3]);
        let outcome = search(&q).unwrap();

        for quantum in 1..=7 {
            assert!(outcome.average_waiting <= average_waiting(&q, quantum).unwrap());
        }
        assert_eq!(outcome.average_waiting, average_waiting(&q, outcome.quantum).unwrap());
    }

    #[test]
    fn test_tie_keeps_smallest_quantum() {
        // Con un solo proceso la espera es 0 para cualquier quantum
        let q = queue(&[6]);
        assert_eq!(best_quantum(&q).unwrap(), 1);

        // Con ráfagas de 1 todos los quanta producen la misma traza
        let q = queue(&[1, 1, 1]);
        assert_eq!(best_quantum(&q).unwrap(), 1);
    }

    #[test]
    fn test_tie_between_different_traces_keeps_smallest_quantum() {
        // [6, 2, 2]: quantum 2 y 6 suman 17 de espera
        let outcome = search(&queue(&[6, 2, 2])).unwrap();
        assert_eq!(outcome.quantum, 2);
        assert_eq!(outcome.total_waiting, 17);

        // [7, 3, 1]: quantum 3 y 7 suman 20 de espera
        let outcome = search(&queue(&[7, 3, 1])).unwrap();
        assert_eq!(outcome.quantum, 3);
        assert_eq!(outcome.total_waiting, 20);

        assert_eq!(best_quantum(&queue(&[11, 6, 4, 1, 1, 4, 1, 1])).unwrap(), 4);
    }

    #[test]
    fn test_known_queue() {
        // [4, 3, 2]: q=1 -> 11.33, q=2 -> 7.67, q=3 -> 6.67, q=4 -> 4.67
        let outcome = search(&queue(&[4, 3, 2])).unwrap();
        assert_eq!(outcome.quantum, 4);
        assert!((outcome.average_waiting - 14.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_queue() {
        assert_eq!(best_quantum(&queue(&[])), Err(Error::EmptyQueue));
    }
}
