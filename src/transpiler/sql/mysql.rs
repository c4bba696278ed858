use super::super::traits::{quote_with, standard_limit_offset, Pagination, ReturningStyle, SqlGenerator};
use super::{compile_args, resolve, Builtin};
use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

/// Largest unsigned 64-bit value. MySQL has no offset without a limit.
const UNBOUNDED_LIMIT: &str = "18446744073709551615";

pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '`', '`')
    }

    fn dual_table(&self) -> Option<&'static str> {
        Some("dual")
    }

    fn empty_insert(&self) -> &'static str {
        "() values ()"
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Unsupported
    }

    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        let Some(builtin) = resolve(self.name(), name, args)? else {
            return c.call(name, args);
        };

        Ok(match builtin {
            Builtin::Length => format!("length({})", compile_args(c, args)?.join(", ")),
            Builtin::Substr => format!("substr({})", compile_args(c, args)?.join(", ")),
            Builtin::Strpos => format!("instr({})", compile_args(c, args)?.join(", ")),
            Builtin::Rand => "rand()".to_string(),
            Builtin::Now => "now()".to_string(),
            Builtin::Utc => "utc_timestamp()".to_string(),
            Builtin::Today => "current_date()".to_string(),
            Builtin::CurrentTime => "current_time()".to_string(),
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
                "limit {} offset {}",
                UNBOUNDED_LIMIT,
                c.parameter(offset, false)?
            ))),
            _ => standard_limit_offset(c, page),
        }
    }
}
