
/// How tightly a token binds to its neighbors during Pratt parsing.
/// Later variants bind more tightly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingPower {
  Default,
  Primary,
  Additive,
  Multiplicative,
  Exponential,
  /// Operand of a prefix minus. Binds tighter than any binary
  /// operator.
  Unary,
}

impl BindingPower {
  pub const MIN: BindingPower = BindingPower::Default;
  pub const MAX: BindingPower = BindingPower::Unary;
}
