use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use gatecirc::{
    Circuit, IntWires,
    gadgets::int::{self, BigInt},
    init_tracing,
};
use tracing::info;

/// Evaluate netlists and compile integer arithmetic to boolean gates
#[derive(Parser)]
#[command(name = "gatecirc", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a netlist over an input value file and print the output bits
    Run {
        /// Netlist (.circ)
        circuit: PathBuf,

        /// Input values, one `<idx> <val>` pair per line
        values: PathBuf,

        /// Also print the outputs as a two's-complement integer
        #[arg(long)]
        signed: bool,
    },

    /// Synthesize an integer operation, evaluate it and print the result
    Synth {
        op: Op,

        /// Operand width in bits
        #[arg(short, long, default_value_t = 8)]
        width: usize,

        /// First operand
        #[arg(short, allow_negative_numbers = true)]
        a: BigInt,

        /// Second operand (binary operations only)
        #[arg(short, allow_negative_numbers = true)]
        b: Option<BigInt>,

        /// Write the synthesized netlist here
        #[arg(long)]
        emit_circuit: Option<PathBuf>,

        /// Write the matching input values here
        #[arg(long)]
        emit_values: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Op {
    Add,
    Sub,
    Neg,
    Lt,
    Le,
    Eq,
    Div,
}

impl Op {
    fn is_comparison(self) -> bool {
        matches!(self, Op::Lt | Op::Le | Op::Eq)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            circuit,
            values,
            signed,
        } => run(&circuit, &values, signed),
        Commands::Synth {
            op,
            width,
            a,
            b,
            emit_circuit,
            emit_values,
        } => synth(
            op,
            width,
            &a,
            b.as_ref(),
            emit_circuit.as_deref(),
            emit_values.as_deref(),
        ),
    }
}

fn run(circuit_path: &Path, values_path: &Path, signed: bool) -> Result<()> {
    let mut circuit = Circuit::from_netlist_file(circuit_path)
        .with_context(|| format!("loading netlist {}", circuit_path.display()))?;
    circuit
        .load_values_file(values_path)
        .with_context(|| format!("loading values {}", values_path.display()))?;

    circuit.execute().context("evaluating circuit")?;
    let bits = circuit.output_bits()?;
    info!(gates = circuit.num_gates(), "{}", circuit.gate_count());

    println!("{bits}");
    if signed {
        println!("{}", int::signed_from_bit_string(&bits)?);
    }
    Ok(())
}

fn synth(
    op: Op,
    width: usize,
    a: &BigInt,
    b: Option<&BigInt>,
    emit_circuit: Option<&Path>,
    emit_values: Option<&Path>,
) -> Result<()> {
    if width == 0 {
        bail!("width must be at least one bit");
    }

    let mut circuit = Circuit::new();
    let a_wires = IntWires::new_input(&mut circuit, width);
    a_wires.assign(&mut circuit, a).context("operand a")?;

    let operand_b = match (op, b) {
        (Op::Neg, _) => None,
        (_, Some(b)) => {
            let b_wires = IntWires::new_input(&mut circuit, width);
            b_wires.assign(&mut circuit, b).context("operand b")?;
            Some(b_wires)
        }
        (_, None) => bail!("`{op:?}` needs a second operand (-b)"),
    };

    let result = match (op, &operand_b) {
        (Op::Neg, _) => int::negate(&mut circuit, &a_wires),
        (Op::Add, Some(b)) => int::add(&mut circuit, &a_wires, b),
        (Op::Sub, Some(b)) => int::sub(&mut circuit, &a_wires, b),
        (Op::Div, Some(b)) => int::div(&mut circuit, &a_wires, b),
        (Op::Lt, Some(b)) => IntWires::from_bits([int::less_than(&mut circuit, &a_wires, b)]),
        (Op::Le, Some(b)) => IntWires::from_bits([int::less_or_equal(&mut circuit, &a_wires, b)]),
        (Op::Eq, Some(b)) => IntWires::from_bits([int::equal(&mut circuit, &a_wires, b)]),
        (_, None) => unreachable!("binary operands are checked above"),
    };
    result.mark_output(&mut circuit)?;

    circuit.execute().context("evaluating circuit")?;
    let bits = circuit.output_bits()?;

    println!("{bits}");
    if op.is_comparison() {
        println!("{}", bits == "1");
    } else {
        println!("{}", result.decode_signed(&circuit)?);
    }
    println!("{}", circuit.gate_count());

    if let Some(path) = emit_circuit {
        circuit.write_netlist_file(path)?;
        info!("netlist written to {}", path.display());
    }
    if let Some(path) = emit_values {
        circuit.write_values_file(path)?;
        info!("values written to {}", path.display());
    }
    Ok(())
}
