use super::super::traits::{standard_limit_offset, Pagination, SqlGenerator};
use super::{compile_args, pipe_concat, resolve, Builtin};
use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

pub struct SqliteGenerator;

impl SqliteGenerator {
    /// SQLite has no `repeat()`: build `count` copies of `text` by replacing
    /// the zeros of a hex-quoted zero blob.
    ///
    /// A bound count is referenced a second time through its explicit
    /// index (`?K`) instead of being bound twice.
    fn repeat(
        &self,
        c: &mut Compiler<'_>,
        count: &Operand,
        text: impl FnOnce(&mut Compiler<'_>) -> CompileResult<String>,
    ) -> CompileResult<String> {
        let (first, second) = match count {
            Operand::Value(_) => {
                let first = c.parameter(count, false)?;
                (first, format!("?{}", c.binder().last_index()))
            }
            _ => {
                let first = c.parameter(count, false)?;
                let second = c.parameter(count, false)?;
                (first, second)
            }
        };
        Ok(format!(
            "replace(substr(quote(zeroblob(({} + 1) / 2)), 3, {}), '0', {})",
            first,
            second,
            text(c)?
        ))
    }
}

impl SqlGenerator for SqliteGenerator {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn default_token(&self) -> &'static str {
        "null"
    }

    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        let Some(builtin) = resolve(self.name(), name, args)? else {
            return c.call(name, args);
        };

        Ok(match builtin {
            Builtin::Concat => pipe_concat(c, args)?,
            Builtin::Length => format!("length({})", compile_args(c, args)?.join(", ")),
            Builtin::Substr => format!("substr({})", compile_args(c, args)?.join(", ")),
            Builtin::Left => {
                let args = compile_args(c, args)?;
                format!("substr({}, 1, {})", args[0], args[1])
            }
            Builtin::Right => {
                let wrap = matches!(args[1], Operand::Expr(_));
                let args = compile_args(c, args)?;
                if wrap {
                    format!("substr({}, -({}))", args[0], args[1])
                } else {
                    format!("substr({}, -{})", args[0], args[1])
                }
            }
            Builtin::Strpos => format!("instr({})", compile_args(c, args)?.join(", ")),
            Builtin::Repeat => {
                let text = &args[0];
                self.repeat(c, &args[1], |c| c.parameter(text, false))?
            }
            Builtin::Space => self.repeat(c, &args[0], |_| Ok("' '".to_string()))?,
            Builtin::Rand => "(random() / 18446744073709551616 + .5)".to_string(),
            Builtin::Now => "datetime('now', 'localtime')".to_string(),
            Builtin::Utc => "datetime('now', 'utc')".to_string(),
            Builtin::Today => "date('now', 'localtime')".to_string(),
            Builtin::CurrentTime => "time('now', 'localtime')".to_string(),
            Builtin::Part(part) => format!(
                "cast(strftime('{}', {}) as integer)",
                part.strftime(),
                c.parameter(&args[0], false)?
            ),
            _ => c.call(name, args)?,
        })
    }

    fn limit_offset(
        &self,
        c: &mut Compiler<'_>,
        page: &Pagination<'_>,
    ) -> CompileResult<Option<String>> {
        match (page.limit, page.offset) {
            (None, Some(offset)) => Ok(Some(format!(
                "limit -1 offset {}",
                c.parameter(offset, false)?
            ))),
            _ => standard_limit_offset(c, page),
        }
    }
}
