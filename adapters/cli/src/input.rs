use anyhow::{bail, Context, Result};
use froggies_core::{CellCoord, Seed};

/// Help text listing every action understood by [`parse`].
pub(crate) const HELP: &str = "\
actions:
  probe X Y | p X Y | X Y   probe a cell
  mega X Y                  spend a mega-probe on the 3x3 block around a cell
  arm                       arm a mega-probe for the next probe
  radar                     spend a radar to reveal the frogs
  state                     show the board
  reset                     replay the current board from the start
  new [SEED]                start a new board
  share                     print a code that rebuilds this board
  help                      show this help
  quit                      leave the game";

/// Player intents parsed from a single line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerAction {
    Probe(CellCoord),
    MegaProbe(CellCoord),
    ArmMegaProbe,
    Radar,
    ShowState,
    Reset,
    NewGame(Option<Seed>),
    Share,
    Help,
    Quit,
}

/// Parses one input line; blank lines and `#` comments yield `None`.
pub(crate) fn parse(line: &str) -> Result<Option<PlayerAction>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let action = match words.as_slice() {
        ["probe" | "p", x, y] => PlayerAction::Probe(parse_cell(x, y)?),
        ["mega" | "m", x, y] => PlayerAction::MegaProbe(parse_cell(x, y)?),
        ["arm"] => PlayerAction::ArmMegaProbe,
        ["radar" | "r"] => PlayerAction::Radar,
        ["state" | "s"] => PlayerAction::ShowState,
        ["reset"] => PlayerAction::Reset,
        ["new"] => PlayerAction::NewGame(None),
        ["new", seed] => {
            let seed = seed
                .parse::<i64>()
                .with_context(|| format!("seed `{seed}` is not an integer"))?;
            PlayerAction::NewGame(Some(Seed::new(seed)))
        }
        ["share"] => PlayerAction::Share,
        ["help" | "h" | "?"] => PlayerAction::Help,
        ["quit" | "q" | "exit"] => PlayerAction::Quit,
        [x, y] => PlayerAction::Probe(parse_cell(x, y)?),
        _ => bail!("unrecognised action `{line}`; type `help` for a list"),
    };
    Ok(Some(action))
}

fn parse_cell(x: &str, y: &str) -> Result<CellCoord> {
    let x = x
        .parse::<i32>()
        .with_context(|| format!("column `{x}` is not an integer"))?;
    let y = y
        .parse::<i32>()
        .with_context(|| format!("row `{y}` is not an integer"))?;
    Ok(CellCoord::new(x, y))
}
