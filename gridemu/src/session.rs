use std::{
    fmt::Write as _,
    io::{self, Write},
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Instant,
};

use libgridemu::{codec, memory::CellPatch, scheduler::Scheduler, CycleOutcome, Emulator};
use libgridisa::{address::Address, Word, CELL_COUNT, GRID_SIZE};

use crate::command::{Command, CommandError};

const DEFAULT_BREAK_LIMIT: u64 = 1_000_000;

enum Flow {
    Continue,
    Quit,
}

/// Interactive front end. Commands are polled between cycles while the scheduler runs and
/// waited on while it's paused.
pub struct Session {
    emulator: Emulator,
    scheduler: Scheduler,
}

impl Session {
    pub fn new(emulator: Emulator, scheduler: Scheduler) -> Self {
        Self {
            emulator,
            scheduler,
        }
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        let commands = Command::spawn_reader();

        loop {
            let Some(command) = self.next_command(&commands)? else {
                return Ok(());
            };

            match self.execute_command(&command) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("!> {}", e),
            }
        }
    }

    /// Keeps the scheduler ticking until a command comes in. `None` once stdin is closed.
    fn next_command(&mut self, commands: &Receiver<Command>) -> anyhow::Result<Option<Command>> {
        loop {
            if !self.scheduler.is_running() {
                self.print_status()?;
                return Ok(commands.recv().ok());
            }

            self.scheduler.poll(&mut self.emulator, Instant::now());

            let wait = self
                .scheduler
                .time_until_tick(Instant::now())
                .unwrap_or_default();

            match commands.recv_timeout(wait) {
                Ok(command) => return Ok(Some(command)),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }
        }
    }

    fn print_status(&self) -> io::Result<()> {
        print!(
            "<<<   PC: {}, cycles: {}, program: {} ops   >>>\n> ",
            self.emulator.pc(),
            self.emulator.cycles(),
            self.emulator.program().len(),
        );
        io::stdout().flush()
    }

    fn execute_command(&mut self, command: &Command) -> Result<Flow, CommandError> {
        let mut args = command.args();

        let Some(name) = args.next_optional() else {
            return Ok(Flow::Continue);
        };

        match name {
            "e" => {
                let count = args.next_parsed_or(1)?;
                self.emulator.run_cycles(count);
            }
            "eb" => {
                let break_pc: Word = args.next_parsed()?;
                let limit = args.next_parsed_or(DEFAULT_BREAK_LIMIT)?;

                match self.emulator.run_until_pc(break_pc, limit) {
                    Some(executed) => println!("Executed {} cycles", executed),
                    None => eprintln!("Didn't reach PC {} within {} cycles", break_pc, limit),
                }
            }
            "p" => {
                if self.scheduler.toggle(Instant::now()) {
                    println!("Running every {:?}", self.scheduler.interval());
                } else {
                    println!("Paused");
                }
            }
            "s" => match self.scheduler.step(&mut self.emulator) {
                CycleOutcome::Executed { pc, next_pc, .. } => {
                    let operation = self.emulator.program().operation(pc);
                    println!(
                        "{:>5}  {}  -> {}",
                        pc,
                        operation.map(ToString::to_string).unwrap_or_default(),
                        next_pc
                    );
                }
                CycleOutcome::Idle { pc } => println!("Idle at {}", pc),
            },
            "d" => {
                let begin = args.next_parsed_or(0usize)?;
                let length = args.next_parsed_or(GRID_SIZE)?;
                let mode = args.next_optional().unwrap_or("x");

                println!("{}", self.dump(begin, length, mode)?);
            }
            "c" => print!("{}", format_patches(self.emulator.memory.pop_patches())),
            "w" => {
                let x: usize = args.next_parsed()?;
                let y: usize = args.next_parsed()?;
                let value: u8 = args.next_parsed()?;

                let addr = Address::checked(x, y).ok_or(CommandError::OutOfGrid(x, y))?;
                self.emulator.memory.write(addr, value);
            }
            "jmp" => {
                let pc = args.next_parsed()?;
                self.emulator.memory.set_pc(pc);
            }
            "l" => print!("{}", self.emulator.program()),
            "reset" => self.emulator.reset(),
            "q" => return Ok(Flow::Quit),
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        }

        let unused_arg_count = args.remaining();
        if unused_arg_count != 0 {
            eprintln!("{} unused command arguments!", unused_arg_count);
        }

        Ok(Flow::Continue)
    }

    fn dump(&self, begin: usize, length: usize, mode: &str) -> Result<String, CommandError> {
        let end = begin.saturating_add(length).min(CELL_COUNT);
        let addrs = (begin.min(end)..end).map(Address::from_index);

        let mut output = String::new();

        match mode {
            "x" => {
                for addr in addrs {
                    let separator = if addr.x() == 0 && addr.index() != begin {
                        "\n"
                    } else {
                        " "
                    };
                    let _ = write!(output, "{}{:02x}", separator, self.emulator.memory.read(addr));
                }
            }
            "a" => {
                let text: String = addrs
                    .map(|addr| self.emulator.memory.read(addr) as char)
                    .collect();
                output = format!("{:?}", text);
            }
            "c" => {
                for addr in addrs {
                    let color = self.emulator.memory.color(addr);
                    let _ = writeln!(
                        output,
                        "{}: #{:02x}{:02x}{:02x} ({:#04x})",
                        addr,
                        color.r,
                        color.g,
                        color.b,
                        codec::decode(color)
                    );
                }
            }
            _ => return Err(CommandError::ParseError(format!("Unrecognized dump mode {}", mode))),
        }

        Ok(output)
    }
}

/// Lists cells written since the last listing in raster order, flagging the PC cells.
fn format_patches(patches: impl Iterator<Item = (Address, CellPatch)>) -> String {
    let mut patches: Vec<_> = patches.collect();
    patches.sort_unstable_by_key(|(addr, _)| addr.index());

    let mut output = String::new();

    for (addr, patch) in patches {
        let color = patch.color();
        let _ = writeln!(
            output,
            "{}: {:#04x} #{:02x}{:02x}{:02x}{}",
            addr,
            patch.new_value,
            color.r,
            color.g,
            color.b,
            if addr.is_pc_cell() { " (pc)" } else { "" }
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use libgridemu::memory::Memory;
    use libgridisa::address::Address;

    use super::format_patches;

    #[test]
    fn changed_cells_in_raster_order() {
        let mut memory = Memory::new();
        memory.write(Address::new(1, 1), 0xFF);
        memory.write(Address::new(2, 0), 0x01);
        memory.set_pc(3);

        assert_eq!(
            format_patches(memory.pop_patches()),
            "002,000: 0x01 #00003f\n\
             001,001: 0xff #e0e0ff\n\
             077,077: 0x03 #0000ff (pc)\n"
        );

        // Drained.
        assert_eq!(format_patches(memory.pop_patches()), "");
    }
}
