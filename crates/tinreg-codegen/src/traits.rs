use crate::arity::{arities, Arity};
use crate::context::EmitContext;

/// Which of the two generated files an emitter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Classes,
    Macros,
}

/// Emitter for one generated file.
///
/// An emitter writes a banner, then one block per arity in ascending order,
/// then an optional footer. It keeps no state between arities.
pub trait UnitEmitter {
    /// Which file this emitter produces.
    fn file_kind(&self) -> FileKind;

    /// Number of emission units written for each arity.
    fn units_per_arity(&self) -> usize;

    /// Write the banner comment at the top of the file.
    fn emit_header(&self, ctx: &mut EmitContext);

    /// Write every emission unit for one arity.
    fn emit_arity(&self, arity: Arity, ctx: &mut EmitContext);

    /// Write anything that follows the last arity. Default: nothing.
    fn emit_footer(&self, _ctx: &mut EmitContext) {}
}

/// Run an emitter over arities `0..=max` and return the file text.
pub fn render(emitter: &dyn UnitEmitter, max: Arity) -> String {
    let mut ctx = EmitContext::default();
    emitter.emit_header(&mut ctx);
    for arity in arities(max) {
        log::debug!("{:?}: emitting arity {}", emitter.file_kind(), arity);
        emitter.emit_arity(arity, &mut ctx);
    }
    emitter.emit_footer(&mut ctx);
    ctx.finish()
}

/// Banner comment shared by both files.
pub(crate) fn emit_banner(title: &str, ctx: &mut EmitContext) {
    let rule = format!("// {}", "-".repeat(96));
    ctx.line(&rule);
    ctx.line(format!("// {}", title));
    ctx.line(&rule);
}
