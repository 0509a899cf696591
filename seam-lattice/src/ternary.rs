/// A ternary expression.  Rust's `if` is already an expression, but
/// `cargo fmt` spreads it over five lines, and a table of edge rules
/// (first column? last row?) reads far better one rule to a line.
/// Only the chosen branch is evaluated, so `cq!(x == 0, BORDER, x - 1)`
/// never underflows.
#[doc(hidden)]
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
