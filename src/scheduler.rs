//! # Módulo de Planificación
//! 
//! Este módulo implementa el simulador de Round Robin usado para evaluar cada
//! quantum. Todos los procesos llegan en el instante 0 y cada salida de la
//! CPU cuesta una unidad de tiempo de cambio de contexto.

use std::fmt;

use crate::error::{Error, Result};
use crate::generator::BurstQueue;

/// Porción de CPU que recibe cada proceso por ronda.
pub type Quantum = u32;

/// Unidades de tiempo que se cobran cada vez que un proceso sale de la CPU.
pub const CONTEXT_SWITCH_COST: i64 = 1;

/// Algoritmos de planificación disponibles para el simulador.
/// 
/// - FCFS ejecuta cada proceso hasta completarlo, en el orden de la cola
/// - Round Robin limita cada turno al quantum configurado
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulingAlgorithm {
    /// First-Come First-Served: cada proceso corre completo en su turno.
    Fcfs,

    /// Round Robin: los procesos se turnan la CPU en rondas de a lo sumo
    /// `quantum` unidades.
    RoundRobin {
        /// Tiempo máximo de ejecución continua por ronda
        quantum: Quantum,
    },
}

impl SchedulingAlgorithm {
    /// Crea un nuevo algoritmo FCFS.
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    /// Crea un nuevo algoritmo Round Robin con el quantum especificado.
    /// 
    /// # Examples
    /// 
    /// ```rust
    /// use dynamic_quantum_simulator::SchedulingAlgorithm;
    /// 
    /// let algorithm = SchedulingAlgorithm::round_robin(5);
    /// assert_eq!(algorithm.get_quantum(), Some(5));
    /// ```
    pub fn round_robin(quantum: Quantum) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Determina si el algoritmo es preemptivo.
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs => false,
            Self::RoundRobin { .. } => true,
        }
    }

    /// Calcula cuánto corre un proceso en su turno.
    /// 
    /// # Arguments
    /// 
    /// * `remaining` - Ráfaga restante del proceso
    /// 
    /// # Returns
    /// 
    /// Las unidades de CPU que se le conceden en esta ronda (nunca negativas)
    /// 
    /// # Examples
    /// 
    /// ```rust
    /// use dynamic_quantum_simulator::SchedulingAlgorithm;
    /// 
    /// assert_eq!(SchedulingAlgorithm::fcfs().calculate_quantum(7), 7);
    /// assert_eq!(SchedulingAlgorithm::round_robin(3).calculate_quantum(7), 3);
    /// assert_eq!(SchedulingAlgorithm::round_robin(3).calculate_quantum(2), 2);
    /// ```
    pub fn calculate_quantum(&self, remaining: i64) -> i64 {
        let slice = match self {
            Self::Fcfs => remaining,
            Self::RoundRobin { quantum } => remaining.min(i64::from(*quantum)),
        };
        slice.max(0)
    }

    /// Obtiene el quantum configurado para Round Robin.
    pub fn get_quantum(&self) -> Option<Quantum> {
        match self {
            Self::Fcfs => None,
            Self::RoundRobin { quantum } => Some(*quantum),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
        }
    }
}

/// Resultado de un proceso tras la simulación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Ráfaga original del proceso
    pub burst: i64,
    /// Instante en que terminó (0 si nunca terminó)
    pub completion: i64,
    /// Tiempo de espera: finalización menos ráfaga
    pub waiting: i64,
}

/// Resultado completo de simular una cola.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Resultados por proceso, en el orden de la cola
    pub processes: Vec<ProcessOutcome>,
    /// Reloj al terminar, incluido el último cambio de contexto
    pub elapsed: i64,
    /// Suma exacta de los tiempos de espera
    pub total_waiting: i64,
    /// Tiempo de espera promedio (`total_waiting / procesos`)
    pub average_waiting: f64,
}

/// Simula la ejecución de una cola con el algoritmo dado.
/// 
/// En cada ronda se recorren los procesos en el orden de la cola; los que ya
/// terminaron (ráfaga restante 0) se saltan. Tras cada turno se suma
/// [`CONTEXT_SWITCH_COST`], incluso después del último proceso. Las rondas
/// se repiten mientras el proceso 0 tenga ráfaga pendiente: al tener la
/// ráfaga más larga es el último en terminar.
/// 
/// Un proceso con ráfaga negativa nunca corre ni termina, pero su turno sí
/// cobra el cambio de contexto.
/// 
/// # Errors
/// 
/// [`Error::EmptyQueue`] si la cola no tiene procesos y
/// [`Error::ZeroQuantum`] para Round Robin con quantum 0.
pub fn simulate(queue: &BurstQueue, algorithm: &SchedulingAlgorithm) -> Result<SimulationOutcome> {
    if queue.is_empty() {
        return Err(Error::EmptyQueue);
    }
    if algorithm.get_quantum() == Some(0) {
        return Err(Error::ZeroQuantum);
    }

    let bursts = queue.bursts();
    let mut remaining = bursts.to_vec();
    let mut completion = vec![0i64; bursts.len()];
    let mut elapsed = 0i64;

    while remaining[0] > 0 {
        for (i, left) in remaining.iter_mut().enumerate() {
            if *left == 0 {
                continue;
            }

            let slice = algorithm.calculate_quantum(*left);
            *left -= slice;
            elapsed += slice;

            if *left == 0 {
                completion[i] = elapsed;
            }

            elapsed += CONTEXT_SWITCH_COST;
        }
    }

    let processes: Vec<ProcessOutcome> = bursts
        .iter()
        .zip(&completion)
        .map(|(&burst, &completion)| ProcessOutcome {
            burst,
            completion,
            waiting: completion - burst,
        })
        .collect();

    // Totales iguales deben dar promedios idénticos: se divide una sola vez
    let total_waiting: i64 = processes.iter().map(|p| p.waiting).sum();
    let average_waiting = total_waiting as f64 / processes.len() as f64;

    Ok(SimulationOutcome {
        processes,
        elapsed,
        total_waiting,
        average_waiting,
    })
}

/// Tiempo de espera promedio de la cola con Round Robin y el quantum dado.
/// 
/// # Examples
/// 
/// ```rust
/// use dynamic_quantum_simulator::{average_waiting, BurstQueue};
/// 
/// let queue = BurstQueue::from(vec![4, 3, 2]);
/// let avg = average_waiting(&queue, 2).unwrap();
/// assert!((avg - 23.0 / 3.0).abs() < 1e-9);
/// ```
pub fn average_waiting(queue: &BurstQueue, quantum: Quantum) -> Result<f64> {
    simulate(queue, &SchedulingAlgorithm::round_robin(quantum)).map(|o| o.average_waiting)
}

/// Tiempo de espera promedio de la cola atendida en orden FCFS.
pub fn fcfs_average_waiting(queue: &BurstQueue) -> Result<f64> {
    simulate(queue, &SchedulingAlgorithm::fcfs()).map(|o| o.average_waiting)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(bursts: &[i64]) -> BurstQueue {
        BurstQueue::from(bursts.to_vec())
    }

    #[test]
    fn test_round_robin_trace() {
        let outcome = simulate(&queue(&[4, 3, 2]), &SchedulingAlgorithm::round_robin(2)).unwrap();

        let completions: Vec<i64> = outcome.processes.iter().map(|p| p.completion).collect();
        assert_eq!(completions, vec![11, 13, 8]);

        let waits: Vec<i64> = outcome.processes.iter().map(|p| p.waiting).collect();
        assert_eq!(waits, vec![7, 10, 6]);

        assert_eq!(outcome.elapsed, 14);
        assert_eq!(outcome.total_waiting, 23);
        assert!((outcome.average_waiting - 23.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fcfs_trace() {
        let outcome = simulate(&queue(&[4, 3, 2]), &SchedulingAlgorithm::fcfs()).unwrap();
        let completions: Vec<i64> = outcome.processes.iter().map(|p| p.completion).collect();
        assert_eq!(completions, vec![4, 8, 11]);
        assert!((outcome.average_waiting - 14.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_quantum_matches_fcfs() {
        let q = queue(&[6, 1, 5, 2]);
        let fcfs = fcfs_average_waiting(&q).unwrap();
        assert_eq!(average_waiting(&q, 6).unwrap(), fcfs);
        assert_eq!(average_waiting(&q, 50).unwrap(), fcfs);
    }

    #[test]
    fn test_equal_totals_give_identical_averages() {
        // [6, 2, 2]: quantum 2 y quantum 6 suman 17 de espera con trazas distintas
        let q = queue(&[6, 2, 2]);
        let two = simulate(&q, &SchedulingAlgorithm::round_robin(2)).unwrap();
        let six = simulate(&q, &SchedulingAlgorithm::round_robin(6)).unwrap();
        assert_ne!(two.processes, six.processes);
        assert_eq!(two.total_waiting, 17);
        assert_eq!(six.total_waiting, 17);
        assert_eq!(two.average_waiting.to_bits(), six.average_waiting.to_bits());
    }

    #[test]
    fn test_input_queue_is_not_mutated() {
        let q = queue(&[5, 2, 3]);
        let first = average_waiting(&q, 1).unwrap();
        let second = average_waiting(&q, 1).unwrap();
        assert_eq!(first, second);
        assert_eq!(q.bursts(), &[5, 2, 3]);
    }

    #[test]
    fn test_zero_burst_is_skipped() {
        // El proceso con ráfaga 0 nunca ocupa turno ni cobra cambio de contexto
        let outcome = simulate(&queue(&[3, 0]), &SchedulingAlgorithm::round_robin(3)).unwrap();
        assert_eq!(outcome.elapsed, 4);
        assert_eq!(outcome.processes[1].waiting, 0);
    }

    #[test]
    fn test_negative_burst_is_charged_a_switch() {
        let outcome = simulate(&queue(&[2, -1]), &SchedulingAlgorithm::round_robin(1)).unwrap();
        // Dos rondas: cada una cobra 1 de CPU + 1 de cambio por P0 y 1 de cambio por P1
        assert_eq!(outcome.elapsed, 6);
        assert_eq!(outcome.processes[0].completion, 4);
        assert_eq!(outcome.processes[1].completion, 0);
        assert_eq!(outcome.processes[1].waiting, 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(average_waiting(&queue(&[]), 1), Err(Error::EmptyQueue));
        assert_eq!(average_waiting(&queue(&[3]), 0), Err(Error::ZeroQuantum));
    }

    #[test]
    fn test_display() {
        assert_eq!(SchedulingAlgorithm::fcfs().to_string(), "FCFS");
        assert_eq!(SchedulingAlgorithm::round_robin(4).to_string(), "Round Robin (quantum 4)");
        assert!(SchedulingAlgorithm::round_robin(4).is_preemptive());
        assert!(!SchedulingAlgorithm::fcfs().is_preemptive());
    }
}
