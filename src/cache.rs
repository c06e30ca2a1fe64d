//! # Módulo de la Tabla de Quanta
//! 
//! Este módulo precalcula el mejor quantum para cada forma de cola
//! `(procesos, tiempo total, ráfaga más larga)` dentro de unos límites y lo
//! guarda en una tabla tridimensional. La tabla se construye una sola vez con
//! [`QuantaCache::populate`] y después sólo se consulta, por lo que puede
//! compartirse por referencia entre cualquier número de lectores.
//! 
//! Cada celda se calcula con una única cola representativa generada al azar:
//! el valor guardado es una estimación, no el óptimo para toda cola con esa
//! forma.

use std::fmt;
use std::time::Instant;

use log::{debug, info, trace};
use rand::Rng;

use crate::error::{Axis, Error, Result};
use crate::generator::generate;
use crate::scheduler::Quantum;
use crate::search::best_quantum;

/// Longitud de cada dimensión de la tabla.
/// 
/// Los índices válidos van de 0 a `límite - 1`; el índice 0 de cada eje
/// nunca se calcula y queda en 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBounds {
    /// Límite del número de procesos
    pub num_processes: usize,
    /// Límite del tiempo total de ráfaga
    pub total_time: usize,
    /// Límite de la ráfaga más larga
    pub longest_burst: usize,
}

impl CacheBounds {
    /// Crea límites para las tres dimensiones.
    pub fn new(num_processes: usize, total_time: usize, longest_burst: usize) -> Self {
        Self {
            num_processes,
            total_time,
            longest_burst,
        }
    }

    /// Comprueba los límites y devuelve el número total de celdas.
    fn validate(&self) -> Result<usize> {
        let axes = [
            (self.num_processes, Axis::Processes),
            (self.total_time, Axis::TotalTime),
            (self.longest_burst, Axis::LongestBurst),
        ];
        if let Some(&(_, axis)) = axes.iter().find(|(len, _)| *len == 0) {
            return Err(Error::EmptyDimension { axis });
        }

        self.num_processes
            .checked_mul(self.total_time)
            .and_then(|cells| cells.checked_mul(self.longest_burst))
            .ok_or(Error::TableTooLarge {
                num_processes: self.num_processes,
                total_time: self.total_time,
                longest_burst: self.longest_burst,
            })
    }
}

impl fmt::Display for CacheBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}",
            self.num_processes, self.total_time, self.longest_burst
        )
    }
}

/// Posición de una celda de la tabla.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    /// Índice en el eje de procesos
    pub num_processes: usize,
    /// Índice en el eje de tiempo total
    pub total_time: usize,
    /// Índice en el eje de ráfaga más larga
    pub longest_burst: usize,
}

/// Resultado explícito de una consulta a la tabla.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumLookup {
    /// La forma pedida está en la tabla y tiene un quantum válido
    Quantum(Quantum),
    /// La forma pedida está en la tabla pero es infactible
    Infeasible,
    /// Algún argumento estaba fuera de rango y se sustituyó por el último
    /// índice de su eje; `value` es lo que guarda la celda resultante
    OutOfRange {
        /// Celda realmente consultada
        index: CellIndex,
        /// Valor de esa celda (0 si es infactible)
        value: Quantum,
    },
}

impl QuantumLookup {
    /// Valor numérico compatible con la consulta clásica: 0 significa que no
    /// hay quantum válido.
    pub fn value(&self) -> Quantum {
        match self {
            Self::Quantum(quantum) => *quantum,
            Self::Infeasible => 0,
            Self::OutOfRange { value, .. } => *value,
        }
    }
}

/// Indica si existe alguna cola de `p` procesos con tiempo total `t` y
/// ráfaga más larga `l` en la que todos los procesos reciban al menos 1.
/// 
/// # Examples
/// 
/// ```rust
/// use dynamic_quantum_simulator::cache::is_feasible;
/// 
/// assert!(is_feasible(3, 21, 19));
/// assert!(!is_feasible(3, 20, 19));
/// assert!(!is_feasible(5, 4, 1));
/// ```
pub fn is_feasible(num_processes: usize, total_time: usize, longest_burst: usize) -> bool {
    if num_processes == 0 || total_time < num_processes || longest_burst > total_time {
        return false;
    }
    // t - (p - 1) >= l
    total_time + 1 >= longest_burst + num_processes
}

/// Tabla tridimensional de quanta óptimos.
#[derive(Debug, Clone)]
pub struct QuantaCache {
    bounds: CacheBounds,
    cells: Vec<Quantum>,
}

impl QuantaCache {
    /// Construye la tabla completa.
    /// 
    /// Recorre cada forma con índices de 1 a `límite - 1` en los tres ejes.
    /// Las formas infactibles quedan en 0; para el resto se genera una cola
    /// representativa y se guarda su mejor quantum.
    /// 
    /// # Arguments
    /// 
    /// * `bounds` - Longitud de cada dimensión
    /// * `rng` - Fuente de aleatoriedad para las colas representativas
    /// 
    /// # Errors
    /// 
    /// [`Error::EmptyDimension`] si alguno de los límites es 0 y
    /// [`Error::TableTooLarge`] si el número de celdas no cabe en `usize`.
    /// 
    /// # Examples
    /// 
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use dynamic_quantum_simulator::{CacheBounds, QuantaCache};
    /// 
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let cache = QuantaCache::populate(CacheBounds::new(6, 10, 6), &mut rng).unwrap();
    /// let quantum = cache.lookup(3, 8, 4);
    /// assert!((1..=4).contains(&quantum));
    /// ```
    pub fn populate<R: Rng + ?Sized>(bounds: CacheBounds, rng: &mut R) -> Result<Self> {
        let cell_count = bounds.validate()?;

        info!("Generando tabla de quanta {}", bounds);
        let started = Instant::now();

        let mut cache = Self {
            bounds,
            cells: vec![0; cell_count],
        };
        let mut feasible = 0usize;
        let mut infeasible = 0usize;

        for p in 1..bounds.num_processes {
            for t in 1..bounds.total_time {
                for l in 1..bounds.longest_burst {
                    if !is_feasible(p, t, l) {
                        infeasible += 1;
                        continue;
                    }

                    let queue = generate(p, t as i64, l as i64, rng);
                    let quantum = best_quantum(&queue)?;
                    trace!("({}, {}, {}) {} -> quantum {}", p, t, l, queue, quantum);

                    let offset = cache.offset(p, t, l);
                    cache.cells[offset] = quantum;
                    feasible += 1;
                }
            }
        }

        debug!("Celdas factibles: {}, infactibles: {}", feasible, infeasible);
        info!(
            "Tabla de quanta lista en {:.3}s",
            started.elapsed().as_secs_f64()
        );

        Ok(cache)
    }

    /// Límites con los que se construyó la tabla.
    pub fn bounds(&self) -> CacheBounds {
        self.bounds
    }

    /// Valor exacto de una celda, o `None` si el índice no existe.
    pub fn cell(&self, num_processes: usize, total_time: usize, longest_burst: usize) -> Option<Quantum> {
        if num_processes >= self.bounds.num_processes
            || total_time >= self.bounds.total_time
            || longest_burst >= self.bounds.longest_burst
        {
            return None;
        }
        Some(self.cells[self.offset(num_processes, total_time, longest_burst)])
    }

    /// Consulta la tabla con la política de recorte por eje.
    /// 
    /// Cada argumento se trata por separado: si es `<= 0` o no cabe en su
    /// eje se sustituye por el último índice de ese eje. La celda resultante
    /// no se vuelve a validar, así que una consulta recortada puede devolver
    /// el valor de una forma sin relación con la pedida.
    pub fn resolve(&self, num_processes: i64, time_remaining: i64, longest_process_time: i64) -> QuantumLookup {
        let (p, p_clamped) = clamp_axis(num_processes, self.bounds.num_processes);
        let (t, t_clamped) = clamp_axis(time_remaining, self.bounds.total_time);
        let (l, l_clamped) = clamp_axis(longest_process_time, self.bounds.longest_burst);

        let value = self.cells[self.offset(p, t, l)];

        if p_clamped || t_clamped || l_clamped {
            debug!(
                "Consulta ({}, {}, {}) fuera de rango, se usa ({}, {}, {})",
                num_processes, time_remaining, longest_process_time, p, t, l
            );
            return QuantumLookup::OutOfRange {
                index: CellIndex {
                    num_processes: p,
                    total_time: t,
                    longest_burst: l,
                },
                value,
            };
        }

        if value == 0 {
            QuantumLookup::Infeasible
        } else {
            QuantumLookup::Quantum(value)
        }
    }

    /// Quantum para la forma pedida; 0 indica que no hay quantum válido.
    /// 
    /// Equivale a `resolve(..).value()`.
    pub fn lookup(&self, num_processes: i64, time_remaining: i64, longest_process_time: i64) -> Quantum {
        self.resolve(num_processes, time_remaining, longest_process_time)
            .value()
    }

    fn offset(&self, p: usize, t: usize, l: usize) -> usize {
        (p * self.bounds.total_time + t) * self.bounds.longest_burst + l
    }
}

/// Devuelve el índice a usar en un eje de longitud `len` y si hubo recorte.
fn clamp_axis(arg: i64, len: usize) -> (usize, bool) {
    match usize::try_from(arg) {
        Ok(index) if index > 0 && index < len => (index, false),
        _ => (len - 1, true),
    }
}
