use super::super::traits::SqlGenerator;
use super::{compile_args, resolve, Builtin};
use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

pub struct PostgresGenerator;

impl SqlGenerator for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgre"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "true".to_string() } else { "false".to_string() }
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        let Some(builtin) = resolve(self.name(), name, args)? else {
            return c.call(name, args);
        };

        Ok(match builtin {
            Builtin::Length => format!("length({})", compile_args(c, args)?.join(", ")),
            Builtin::Substr => format!("substr({})", compile_args(c, args)?.join(", ")),
            Builtin::Strpos => format!("strpos({})", compile_args(c, args)?.join(", ")),
            Builtin::Space => format!("repeat(' ', {})", c.parameter(&args[0], false)?),
            Builtin::Now => "localtimestamp(0)".to_string(),
            Builtin::Utc => "current_timestamp(0) at time zone 'UTC'".to_string(),
            Builtin::Today => "current_date".to_string(),
            Builtin::CurrentTime => "current_time(0)".to_string(),
            Builtin::Date => format!("{}::date", c.parameter(&args[0], false)?),
            Builtin::Time => format!("{}::time(0)", c.parameter(&args[0], false)?),
            Builtin::Part(part) => format!(
                "extract({} from {})",
                part.as_str(),
                c.parameter(&args[0], false)?
            ),
            _ => c.call(name, args)?,
        })
    }
}
