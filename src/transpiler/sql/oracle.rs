use super::super::traits::{Pagination, ReturningStyle, SqlGenerator};
use super::{compile_args, pipe_concat, resolve, Builtin};
use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

pub struct OracleGenerator;

impl SqlGenerator for OracleGenerator {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    fn dual_table(&self) -> Option<&'static str> {
        Some("dual")
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Unsupported
    }

    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        let Some(builtin) = resolve(self.name(), name, args)? else {
            return c.call(name, args);
        };

        Ok(match builtin {
            Builtin::Concat => pipe_concat(c, args)?,
            Builtin::Length => format!("length({})", c.parameter(&args[0], false)?),
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
                let text = c.parameter(&args[0], false)?;
                let again = c.parameter(&args[0], false)?;
                let count = c.parameter(&args[1], false)?;
                let pad = c.parameter(&args[0], false)?;
                format!("rpad({}, length({}) * {}, {})", text, again, count, pad)
            }
            Builtin::Space => format!("rpad(' ', {})", c.parameter(&args[0], false)?),
            Builtin::Rand => "dbms_random.value".to_string(),
            Builtin::Now => "localtimestamp(0)".to_string(),
            Builtin::Utc => "sys_extract_utc(systimestamp)".to_string(),
            Builtin::Today => "trunc(sysdate)".to_string(),
            Builtin::CurrentTime => "to_char(sysdate, 'HH24:MI:SS')".to_string(),
            Builtin::Date => format!("cast({} as date)", c.parameter(&args[0], false)?),
            Builtin::Time => format!("to_char({}, 'HH24:MI:SS')", c.parameter(&args[0], false)?),
            Builtin::Part(part) => format!(
                "extract({} from {})",
                part.as_str(),
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
        let mut parts = Vec::new();
        if let Some(offset) = page.offset {
            parts.push(format!("offset {} rows", c.parameter(offset, false)?));
        }
        if let Some(limit) = page.limit {
            parts.push(format!("fetch next {} rows only", c.parameter(limit, false)?));
        }
        Ok((!parts.is_empty()).then(|| parts.join(" ")))
    }
}
