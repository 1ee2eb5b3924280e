//! `completions` and `man`, both generated from the clap definition.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::Cli;

const BIN_NAME: &str = "portfolio";

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
    dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, &dir)?;
            println!("Wrote {}", path.display());
        }
        None => clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout()),
    }
    Ok(())
}

/// Man pages as `(file name, roff)`: `portfolio.1`, then one
/// `portfolio-<command>.1` per subcommand.
fn man_pages() -> Result<Vec<(String, Vec<u8>)>, std::io::Error> {
    let mut cmd = Cli::command();
    cmd.build();

    let mut pages = Vec::new();
    let mut main = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut main)?;
    pages.push((format!("{BIN_NAME}.1"), main));

    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let title = format!("{BIN_NAME}-{}", sub.get_name());
        let mut page = Vec::new();
        clap_mangen::Man::new(sub.clone())
            .title(title.clone())
            .render(&mut page)?;
        pages.push((format!("{title}.1"), page));
    }

    Ok(pages)
}

fn write_man_pages(dir: &Path) -> Result<usize, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let pages = man_pages()?;
    for (name, page) in &pages {
        std::fs::write(dir.join(name), page)?;
    }
    Ok(pages.len())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            let count = write_man_pages(&dir)?;
            println!("Wrote {count} man pages to {}", dir.display());
        }
        None => {
            if let Some((_, main)) = man_pages()?.into_iter().next() {
                std::io::stdout().write_all(&main)?;
            }
        }
    }
    Ok(())
}
