use std::env;
use std::io::Write;

use env_logger::{Builder, Env};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dynamic_quantum_simulator::{config, CacheBounds, Comparator, QuantaCache, Quantum, QueueShape};

/// Parámetros de una ejecución del simulador.
#[derive(Debug)]
struct RunConfig {
    seed: u64,
    static_quantum: Quantum,
    bounds: CacheBounds,
    shapes: Vec<QueueShape>,
    csv: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: config::DEFAULT_SEED,
            static_quantum: config::STATIC_QUANTUM,
            bounds: config::default_bounds(),
            shapes: Vec::new(),
            csv: false,
        }
    }
}

/// Lee el siguiente argumento como número.
fn parse_number<T: std::str::FromStr>(args: &[String], idx: &mut usize, label: &str) -> Result<T, String> {
    let raw = args
        .get(*idx)
        .ok_or_else(|| format!("Falta valor para {}", label))?;
    *idx += 1;
    raw.parse()
        .map_err(|_| format!("Valor inválido para {}: {}", label, raw))
}

/// Lee tres números consecutivos, todos mayores que 0.
fn parse_triple(args: &[String], idx: &mut usize, label: &str) -> Result<(usize, usize, usize), String> {
    let p: usize = parse_number(args, idx, label)?;
    let t: usize = parse_number(args, idx, label)?;
    let l: usize = parse_number(args, idx, label)?;
    if p == 0 || t == 0 || l == 0 {
        return Err(format!("Los valores de {} deben ser > 0", label));
    }
    Ok((p, t, l))
}

/// Parseo de CLI: [--seed N] [--static-quantum Q] [--bounds P T L] [--shape P T L]... [--csv]
fn parse_args(args: &[String]) -> Result<RunConfig, String> {
    let mut run = RunConfig::default();
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;

        match flag {
            "--seed" => run.seed = parse_number(args, &mut i, "--seed")?,
            "--static-quantum" => {
                run.static_quantum = parse_number(args, &mut i, "--static-quantum")?;
                if run.static_quantum == 0 {
                    return Err("El quantum estático debe ser > 0".to_string());
                }
            }
            "--bounds" => {
                let (p, t, l) = parse_triple(args, &mut i, "--bounds")?;
                run.bounds = CacheBounds::new(p, t, l);
            }
            "--shape" => {
                let (p, t, l) = parse_triple(args, &mut i, "--shape")?;
                run.shapes.push(QueueShape::new(p, t as i64, l as i64));
            }
            "--csv" => run.csv = true,
            other => return Err(format!("Argumento desconocido: {}", other)),
        }
    }

    if run.shapes.is_empty() {
        run.shapes = config::default_shapes();
    }

    Ok(run)
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // ---------- CLI ----------
    let args: Vec<String> = env::args().collect();
    let run = parse_args(&args).unwrap_or_else(|e| {
        eprintln!(
            "Uso:\n  {} [--seed N] [--static-quantum Q] [--bounds P T L] [--shape P T L]... [--csv]\nError: {}",
            args.first().map(String::as_str).unwrap_or("bin"),
            e
        );
        std::process::exit(1);
    });

    println!("=== Simulación de quantum dinámico ===");
    println!("Límites de la tabla: {}", run.bounds);
    println!("Quantum estático: {}", run.static_quantum);
    println!("Semilla: {}", run.seed);

    // ---------- TABLA ----------
    let mut rng = StdRng::seed_from_u64(run.seed);
    let cache = QuantaCache::populate(run.bounds, &mut rng).unwrap_or_else(|e| {
        eprintln!("Error al construir la tabla: {}", e);
        std::process::exit(1);
    });

    // ---------- COMPARACIÓN ----------
    info!("Comparando {} colas", run.shapes.len());
    let comparator = Comparator::new(&cache, run.static_quantum);
    let report = comparator
        .compare_all(&run.shapes, &mut rng)
        .unwrap_or_else(|e| {
            eprintln!("Error en la comparación: {}", e);
            std::process::exit(1);
        });

    if run.csv {
        print!("{}", report.render_csv());
    } else {
        print!("{}", report.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bin")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let run = parse_args(&args(&[])).unwrap();
        assert_eq!(run.seed, config::DEFAULT_SEED);
        assert_eq!(run.static_quantum, config::STATIC_QUANTUM);
        assert_eq!(run.bounds, config::default_bounds());
        assert_eq!(run.shapes, config::default_shapes());
        assert!(!run.csv);
    }

    #[test]
    fn test_flags() {
        let run = parse_args(&args(&[
            "--seed", "7", "--static-quantum", "3", "--bounds", "10", "12", "6", "--shape", "4", "9", "3", "--csv",
        ]))
        .unwrap();
        assert_eq!(run.seed, 7);
        assert_eq!(run.static_quantum, 3);
        assert_eq!(run.bounds, CacheBounds::new(10, 12, 6));
        assert_eq!(run.shapes, vec![QueueShape::new(4, 9, 3)]);
        assert!(run.csv);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(parse_args(&args(&["--static-quantum", "0"])).is_err());
        assert!(parse_args(&args(&["--bounds", "10", "0", "3"])).is_err());
        assert!(parse_args(&args(&["--shape", "4", "9"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
