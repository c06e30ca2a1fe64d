//! # Módulo de Comparación y Reportes
//! 
//! Este módulo compara, para una lista de formas de cola, el tiempo de
//! espera promedio obtenido con el quantum dinámico (consultado en la tabla)
//! frente a un quantum estático fijo, y genera reportes de los resultados.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::cache::QuantaCache;
use crate::error::Result;
use crate::generator::{generate, BurstQueue};
use crate::scheduler::{average_waiting, Quantum};

/// Forma de una cola: número de procesos, tiempo total y ráfaga más larga.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueShape {
    /// Número de procesos en la cola
    pub num_processes: usize,
    /// Suma de las ráfagas
    pub total_time: i64,
    /// Ráfaga más larga
    pub longest_burst: i64,
}

impl QueueShape {
    /// Crea una nueva forma de cola.
    pub fn new(num_processes: usize, total_time: i64, longest_burst: i64) -> Self {
        Self {
            num_processes,
            total_time,
            longest_burst,
        }
    }
}

impl fmt::Display for QueueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.num_processes, self.total_time, self.longest_burst
        )
    }
}

/// Resultado de comparar ambos quanta sobre una cola generada.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumComparison {
    /// Forma pedida
    pub shape: QueueShape,
    /// Cola generada para la forma
    pub queue: BurstQueue,
    /// Quantum de la tabla (0 si la celda es infactible)
    pub dynamic_quantum: Quantum,
    /// Quantum fijo de referencia
    pub static_quantum: Quantum,
    /// Espera promedio con el quantum dinámico, si existe
    pub dynamic_waiting: Option<f64>,
    /// Espera promedio con el quantum estático
    pub static_waiting: f64,
}

impl QuantumComparison {
    /// Diferencia de espera estática menos dinámica; positiva si el quantum
    /// dinámico es mejor.
    pub fn improvement(&self) -> Option<f64> {
        self.dynamic_waiting.map(|dynamic| self.static_waiting - dynamic)
    }
}

/// Compara quanta dinámicos contra un quantum estático.
pub struct Comparator<'a> {
    cache: &'a QuantaCache,
    static_quantum: Quantum,
}

impl<'a> Comparator<'a> {
    /// Crea un comparador sobre una tabla ya construida.
    /// 
    /// # Arguments
    /// 
    /// * `cache` - Tabla de quanta poblada
    /// * `static_quantum` - Quantum fijo contra el que se compara
    pub fn new(cache: &'a QuantaCache, static_quantum: Quantum) -> Self {
        Self {
            cache,
            static_quantum,
        }
    }

    /// Genera una cola con la forma dada y compara ambos quanta sobre ella.
    /// 
    /// # Errors
    /// 
    /// Propaga los errores de la simulación (cola vacía o quantum estático 0).
    pub fn compare<R: Rng + ?Sized>(&self, shape: QueueShape, rng: &mut R) -> Result<QuantumComparison> {
        let queue = generate(shape.num_processes, shape.total_time, shape.longest_burst, rng);
        let dynamic_quantum = self.cache.lookup(
            shape.num_processes as i64,
            shape.total_time,
            shape.longest_burst,
        );

        let dynamic_waiting = match dynamic_quantum {
            0 => None,
            quantum => Some(average_waiting(&queue, quantum)?),
        };
        let static_waiting = average_waiting(&queue, self.static_quantum)?;

        debug!(
            "Forma {} cola {}: dinámico {} -> {:?}, estático {} -> {}",
            shape, queue, dynamic_quantum, dynamic_waiting, self.static_quantum, static_waiting
        );

        Ok(QuantumComparison {
            shape,
            queue,
            dynamic_quantum,
            static_quantum: self.static_quantum,
            dynamic_waiting,
            static_waiting,
        })
    }

    /// Compara todas las formas en orden.
    pub fn compare_all<R: Rng + ?Sized>(&self, shapes: &[QueueShape], rng: &mut R) -> Result<ComparisonReport> {
        let rows = shapes
            .iter()
            .map(|&shape| self.compare(shape, rng))
            .collect::<Result<Vec<_>>>()?;

        Ok(ComparisonReport {
            static_quantum: self.static_quantum,
            rows,
        })
    }
}

/// Conjunto de comparaciones listo para reportar.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    /// Quantum estático usado en todas las filas
    pub static_quantum: Quantum,
    /// Una fila por forma comparada
    pub rows: Vec<QuantumComparison>,
}

impl ComparisonReport {
    /// Número de filas en las que el quantum dinámico esperó estrictamente menos.
    pub fn dynamic_wins(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.improvement(), Some(diff) if diff > 0.0))
            .count()
    }

    /// Genera el reporte de texto.
    pub fn render(&self) -> String {
        let mut report = String::new();

        report.push_str("\n=== QUANTUM DINÁMICO VS ESTÁTICO ===\n\n");
        report.push_str(&format!(
            "{:^16} {:^10} {:^10} {:^10} {:^14} {:^14} {}\n",
            "Forma", "Más larga", "Dinámico", "Estático", "Espera din.", "Espera est.", "Cola"
        ));
        report.push_str(&format!("{}\n", "-".repeat(100)));

        for row in &self.rows {
            let dynamic_quantum = match row.dynamic_quantum {
                0 => "N/A".to_string(),
                quantum => quantum.to_string(),
            };
            let dynamic_waiting = row
                .dynamic_waiting
                .map(|w| format!("{:.3}", w))
                .unwrap_or_else(|| "N/A".to_string());

            report.push_str(&format!(
                "{:^16} {:^10} {:^10} {:^10} {:^14} {:^14} {}\n",
                row.shape.to_string(),
                row.queue.longest(),
                dynamic_quantum,
                row.static_quantum,
                dynamic_waiting,
                format!("{:.3}", row.static_waiting),
                row.queue,
            ));
        }

        report.push_str("\n=== RESUMEN ===\n");
        report.push_str(&format!("Colas comparadas: {}\n", self.rows.len()));
        report.push_str(&format!("Quantum estático: {}\n", self.static_quantum));
        report.push_str(&format!(
            "Colas donde el quantum dinámico espera menos: {}\n",
            self.dynamic_wins()
        ));

        report
    }

    /// Genera el reporte en formato CSV.
    pub fn render_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("Processes,TotalTime,LongestBurst,DynamicQuantum,StaticQuantum,DynamicWaiting,StaticWaiting\n");

        for row in &self.rows {
            let dynamic_waiting = row
                .dynamic_waiting
                .map(|w| format!("{:.3}", w))
                .unwrap_or_else(|| "N/A".to_string());

            csv.push_str(&format!(
                "{},{},{},{},{},{},{:.3}\n",
                row.shape.num_processes,
                row.shape.total_time,
                row.shape.longest_burst,
                row.dynamic_quantum,
                row.static_quantum,
                dynamic_waiting,
                row.static_waiting,
            ));
        }

        csv
    }
}
