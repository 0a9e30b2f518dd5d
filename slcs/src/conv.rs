use std::num::ParseIntError;

use crate::tree::{NodeId, SyntaxTree, Value};
use crate::{CompileError, Mode, Op, Pos};

/// Field names of the encoder's `RGB(red, green, blue)` pixel struct.
const CHANNELS: [&str; 3] = ["red", "green", "blue"];

/// Translates a syntax tree into a modal mu-calculus formula.
///
/// The adjacency between points is the `R` action. `S` is encoded with a least
/// fixpoint on `X`: the points from which one can keep stepping through the
/// first operand without ever meeting the second one. Nested surrounds reuse
/// the same variable name.
pub fn translate(tree: &SyntaxTree, mode: Mode) -> Result<String, CompileError> {
    Translator { tree, mode }.conv(tree.root())
}

struct Translator<'a> {
    tree: &'a SyntaxTree,
    mode: Mode,
}

impl Translator<'_> {
    fn conv(&self, id: NodeId) -> Result<String, CompileError> {
        let node = self.tree.node(id);
        let left = node.left().map(|left| self.conv(left)).transpose()?;
        let right = node.right().map(|right| self.conv(right)).transpose()?;

        let formula = match (node.value(), left, right) {
            (Some(Value::Prop(prop)), None, None) => {
                self.conv_prop(prop, node.pos().unwrap_or_default())?
            }
            (Some(Value::Op(Op::Not)), None, Some(e)) => format!("!({e})"),
            (Some(Value::Op(Op::Near)), None, Some(e)) => format!("(<R>{e})"),
            (Some(Value::Op(Op::And)), Some(l), Some(r)) => format!("({l} && {r})"),
            // There's no disjunction in the target, go through De Morgan.
            (Some(Value::Op(Op::Or)), Some(l), Some(r)) => format!("(!(!({l}) && !({r})))"),
            (Some(Value::Op(Op::Surround)), Some(l), Some(r)) => {
                format!("({l} && !mu X.(!({l} || {r}) || ({l} && <R>X)))")
            }
            // Redundant parentheses
            (None, Some(e), None) => e,
            _ => unreachable!("Malformed node at {}", self.tree.path(id)),
        };

        Ok(formula)
    }

    fn conv_prop(&self, prop: &str, pos: Pos) -> Result<String, CompileError> {
        if self.mode == Mode::Plain {
            return Ok(format!("<{prop}>true"));
        }

        let ranges = prop
            .split(',')
            .map(|range| parse_range(prop, range, pos))
            .collect::<Result<Vec<_>, _>>()?;

        let cond = match (self.mode, ranges.as_slice()) {
            (Mode::SingleChannel, &[(lo, hi)]) => format!("{lo}<=px && px<={hi}"),
            (Mode::ThreeChannel, [_, _, _]) => CHANNELS
                .iter()
                .zip(&ranges)
                .map(|(ch, (lo, hi))| format!("{lo}<={ch}(px) && {ch}(px)<={hi}"))
                .collect::<Vec<_>>()
                .join(" && "),
            _ => {
                return Err(CompileError::NumericParse {
                    prop: prop.to_string(),
                    range: prop.to_string(),
                    pos,
                    source: None,
                })
            }
        };

        Ok(format!("(exists px:Pixel . val({cond}) && <report(px)>true)"))
    }
}

/// Parses one `lo-hi` channel range.
fn parse_range(prop: &str, range: &str, pos: Pos) -> Result<(u32, u32), CompileError> {
    let error = |source: Option<ParseIntError>| CompileError::NumericParse {
        prop: prop.to_string(),
        range: range.to_string(),
        pos,
        source,
    };

    let (lo, hi) = range.split_once('-').ok_or_else(|| error(None))?;
    let lo = lo.trim().parse::<u32>().map_err(|e| error(Some(e)))?;
    let hi = hi.trim().parse::<u32>().map_err(|e| error(Some(e)))?;

    Ok((lo, hi))
}
