//! # Módulo de Generación de Colas
//! 
//! Este módulo construye colas sintéticas de ráfagas de CPU que respetan una
//! forma dada: número de procesos, tiempo total y ráfaga más larga. La
//! fuente de aleatoriedad se recibe como parámetro para que las colas (y por
//! lo tanto la tabla de quanta) sean reproducibles a partir de una semilla.

use std::fmt;

use log::warn;
use rand::Rng;

/// Secuencia ordenada de ráfagas, una por proceso.
/// 
/// Por construcción el índice 0 contiene la ráfaga más larga de la cola y la
/// suma de todas las ráfagas es el tiempo total pedido al generador. Las
/// ráfagas son enteros con signo: el último proceso absorbe el presupuesto
/// sobrante y, para formas inconsistentes, puede quedar en 0 o negativo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BurstQueue {
    bursts: Vec<i64>,
}

/// Inconsistencias que el generador puede producir sin corregirlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationDefect {
    /// La suma de la cola no coincide con el tiempo total pedido
    /// (caso de un único proceso con `total_time != longest_burst`)
    TotalMismatch {
        /// Tiempo total solicitado
        expected: i64,
        /// Suma real de la cola
        actual: i64,
    },
    /// Un proceso quedó con ráfaga 0 o negativa
    NonPositiveBurst {
        /// Posición del proceso en la cola
        index: usize,
        /// Ráfaga asignada
        burst: i64,
    },
}

impl fmt::Display for GenerationDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalMismatch { expected, actual } => {
                write!(f, "tiempo total {} pero la cola suma {}", expected, actual)
            }
            Self::NonPositiveBurst { index, burst } => {
                write!(f, "el proceso {} tiene ráfaga no positiva ({})", index, burst)
            }
        }
    }
}

impl BurstQueue {
    /// Ráfagas en el orden de la cola.
    pub fn bursts(&self) -> &[i64] {
        &self.bursts
    }

    /// Número de procesos en la cola.
    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    /// Indica si la cola no tiene procesos.
    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    /// Ráfaga del proceso en la posición 0, que es la más larga.
    pub fn longest(&self) -> i64 {
        self.bursts.first().copied().unwrap_or(0)
    }

    /// Suma de todas las ráfagas.
    pub fn total(&self) -> i64 {
        self.bursts.iter().sum()
    }

    /// Revisa la cola contra el tiempo total con el que se generó.
    /// 
    /// # Arguments
    /// 
    /// * `total_time` - Tiempo total solicitado al generador
    /// 
    /// # Returns
    /// 
    /// Lista de inconsistencias encontradas; vacía si la cola es coherente
    pub fn defects(&self, total_time: i64) -> Vec<GenerationDefect> {
        let mut defects = Vec::new();

        let actual = self.total();
        if actual != total_time {
            defects.push(GenerationDefect::TotalMismatch {
                expected: total_time,
                actual,
            });
        }

        for (index, &burst) in self.bursts.iter().enumerate() {
            if burst <= 0 {
                defects.push(GenerationDefect::NonPositiveBurst { index, burst });
            }
        }

        defects
    }
}

impl From<Vec<i64>> for BurstQueue {
    fn from(bursts: Vec<i64>) -> Self {
        Self { bursts }
    }
}

impl fmt::Display for BurstQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.bursts)
    }
}

/// Genera una cola aleatoria con la forma indicada.
/// 
/// El proceso 0 recibe `longest_burst`. El presupuesto restante se reparte
/// entre los demás: cada proceso intermedio recibe un valor uniforme en
/// `[0, alto - 1]` (un 0 se convierte en 1), donde `alto` es el presupuesto
/// restante inicial dividido entre los `num_processes - 1` procesos
/// restantes. El último proceso absorbe lo que sobre, sin validación.
/// 
/// Las inconsistencias no se corrigen; se registran con `warn!` y se pueden
/// consultar con [`BurstQueue::defects`].
/// 
/// # Arguments
/// 
/// * `num_processes` - Número de procesos de la cola (se espera `>= 1`)
/// * `total_time` - Tiempo total de ráfaga (se espera `>= longest_burst`)
/// * `longest_burst` - Ráfaga más larga (se espera `>= 1`)
/// * `rng` - Fuente de números pseudoaleatorios
/// 
/// # Examples
/// 
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
/// use dynamic_quantum_simulator::generate;
/// 
/// let mut rng = StdRng::seed_from_u64(7);
/// let queue = generate(5, 17, 3, &mut rng);
/// assert_eq!(queue.len(), 5);
/// assert_eq!(queue.longest(), 3);
/// assert_eq!(queue.total(), 17);
/// ```
pub fn generate<R: Rng + ?Sized>(
    num_processes: usize,
    total_time: i64,
    longest_burst: i64,
    rng: &mut R,
) -> BurstQueue {
    if num_processes == 0 {
        warn!("Se pidió una cola sin procesos (total {}, más larga {})", total_time, longest_burst);
        return BurstQueue::default();
    }

    let mut bursts = vec![0; num_processes];
    bursts[0] = longest_burst;

    if num_processes > 1 {
        let others = (num_processes - 1) as i64;
        let mut remaining = total_time - longest_burst;
        let high = remaining / others;

        let last = num_processes - 1;
        for slot in &mut bursts[1..last] {
            // Rango vacío cuando la forma no deja al menos 1 por proceso
            let drawn = if high > 0 { rng.random_range(0..high) } else { 0 };
            let drawn = drawn.max(1);
            remaining -= drawn;
            *slot = drawn;
        }

        bursts[last] = remaining;
    }

    let queue = BurstQueue { bursts };
    for defect in queue.defects(total_time) {
        warn!(
            "Cola inconsistente para ({}, {}, {}): {}",
            num_processes, total_time, longest_burst, defect
        );
    }

    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_slot_is_longest() {
        let mut rng = StdRng::seed_from_u64(1);
        let queue = generate(4, 19, 4, &mut rng);
        assert_eq!(queue.bursts()[0], 4);
        assert_eq!(queue.total(), 19);
        assert!(queue.defects(19).is_empty());
    }

    #[test]
    fn test_two_processes_have_no_randomness() {
        let mut rng = StdRng::seed_from_u64(99);
        let queue = generate(2, 10, 6, &mut rng);
        assert_eq!(queue.bursts(), &[6, 4]);
    }

    #[test]
    fn test_single_process_total_mismatch_is_kept() {
        let mut rng = StdRng::seed_from_u64(3);
        let queue = generate(1, 10, 4, &mut rng);
        assert_eq!(queue.bursts(), &[4]);
        assert_eq!(
            queue.defects(10),
            vec![GenerationDefect::TotalMismatch { expected: 10, actual: 4 }]
        );
    }

    #[test]
    fn test_tight_budget_gives_one_each() {
        // 6 - 2 = 4 para 3 procesos: alto = 1, todos los sorteos valen 1
        let mut rng = StdRng::seed_from_u64(5);
        let queue = generate(4, 6, 2, &mut rng);
        assert_eq!(queue.bursts(), &[2, 1, 1, 2]);
    }

    #[test]
    fn test_infeasible_shape_leaves_non_positive_last_slot() {
        // Presupuesto de 1 para 3 procesos: los dos intermedios toman 1 cada uno
        let mut rng = StdRng::seed_from_u64(11);
        let queue = generate(4, 5, 4, &mut rng);
        assert_eq!(queue.bursts(), &[4, 1, 1, -1]);
        assert!(queue
            .defects(5)
            .contains(&GenerationDefect::NonPositiveBurst { index: 3, burst: -1 }));
    }

    #[test]
    fn test_same_seed_same_queue() {
        let a = generate(16, 19, 3, &mut StdRng::seed_from_u64(42));
        let b = generate(16, 19, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_processes() {
        let mut rng = StdRng::seed_from_u64(0);
        let queue = generate(0, 5, 5, &mut rng);
        assert!(queue.is_empty());
        assert_eq!(queue.longest(), 0);
    }
}
