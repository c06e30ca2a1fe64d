//! # Módulo de Errores
//! 
//! Errores que pueden devolver las operaciones de la biblioteca. Las
//! condiciones que el modelo absorbe en silencio (celdas infactibles,
//! índices fuera de rango) no son errores: se reportan con
//! [`QuantumLookup`](crate::cache::QuantumLookup).

use std::fmt;

/// Errores de la simulación y de la construcción de la tabla de quanta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Se pidió simular una cola sin procesos
    EmptyQueue,
    /// Un quantum de 0 nunca haría avanzar la simulación
    ZeroQuantum,
    /// Una de las dimensiones de la tabla tendría longitud 0
    EmptyDimension {
        /// Eje afectado
        axis: Axis,
    },
    /// El producto de las tres dimensiones desborda `usize`
    TableTooLarge {
        /// Límite del número de procesos
        num_processes: usize,
        /// Límite del tiempo total
        total_time: usize,
        /// Límite de la ráfaga más larga
        longest_burst: usize,
    },
}

/// Ejes de la tabla tridimensional de quanta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Número de procesos
    Processes,
    /// Tiempo total de ráfaga
    TotalTime,
    /// Ráfaga más larga
    LongestBurst,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processes => write!(f, "número de procesos"),
            Self::TotalTime => write!(f, "tiempo total"),
            Self::LongestBurst => write!(f, "ráfaga más larga"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQueue => write!(f, "la cola de procesos está vacía"),
            Self::ZeroQuantum => write!(f, "el quantum debe ser mayor que 0"),
            Self::EmptyDimension { axis } => {
                write!(f, "la dimensión '{}' de la tabla no puede ser 0", axis)
            }
            Self::TableTooLarge {
                num_processes,
                total_time,
                longest_burst,
            } => write!(
                f,
                "la tabla {}x{}x{} tiene demasiadas celdas",
                num_processes, total_time, longest_burst
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Resultado con el error de la biblioteca.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::ZeroQuantum.to_string(), "el quantum debe ser mayor que 0");
        let err = Error::EmptyDimension { axis: Axis::TotalTime };
        assert_eq!(err.to_string(), "la dimensión 'tiempo total' de la tabla no puede ser 0");
        let err = Error::TableTooLarge { num_processes: 4, total_time: 5, longest_burst: 6 };
        assert_eq!(err.to_string(), "la tabla 4x5x6 tiene demasiadas celdas");
    }
}
