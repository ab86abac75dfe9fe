use crate::error::{CalcError, CalcResult};
use crate::mathlib::{algebra, number_theory, trig};
use crate::settings::AngleMode;
use std::fmt;

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sec,
    Csc,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Root,
    Pow,
    Abs,
    Floor,
    Ceil,
    Round,
    Trunc,
    Exp,
    Pow10,
    Ln,
    Log10,
    LogBase,
    Factorial,
    Perm,
    Comb,
    Gcd,
    Lcm,
    Mod,
    IsPrime,
}

/// Static function table keyed by the full lowercase identifier.
/// A name may appear once per arity (`log(x)` and `log(x, base)`).
const FUNCTIONS: &[(&str, usize, Builtin)] = &[
    ("sin", 1, Builtin::Sin),
    ("cos", 1, Builtin::Cos),
    ("tan", 1, Builtin::Tan),
    ("asin", 1, Builtin::Asin),
    ("acos", 1, Builtin::Acos),
    ("atan", 1, Builtin::Atan),
    ("sec", 1, Builtin::Sec),
    ("csc", 1, Builtin::Csc),
    ("cot", 1, Builtin::Cot),
    ("sinh", 1, Builtin::Sinh),
    ("cosh", 1, Builtin::Cosh),
    ("tanh", 1, Builtin::Tanh),
    ("sqrt", 1, Builtin::Sqrt),
    ("cbrt", 1, Builtin::Cbrt),
    ("root", 2, Builtin::Root),
    ("pow", 2, Builtin::Pow),
    ("abs", 1, Builtin::Abs),
    ("floor", 1, Builtin::Floor),
    ("ceil", 1, Builtin::Ceil),
    ("round", 1, Builtin::Round),
    ("trunc", 1, Builtin::Trunc),
    ("exp", 1, Builtin::Exp),
    ("pow10", 1, Builtin::Pow10),
    ("ln", 1, Builtin::Ln),
    ("log", 1, Builtin::Log10),
    ("log", 2, Builtin::LogBase),
    ("log10", 1, Builtin::Log10),
    ("fact", 1, Builtin::Factorial),
    ("factorial", 1, Builtin::Factorial),
    ("perm", 2, Builtin::Perm),
    ("npr", 2, Builtin::Perm),
    ("comb", 2, Builtin::Comb),
    ("ncr", 2, Builtin::Comb),
    ("gcd", 2, Builtin::Gcd),
    ("lcm", 2, Builtin::Lcm),
    ("mod", 2, Builtin::Mod),
    ("isprime", 1, Builtin::IsPrime),
];

pub fn is_function_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    FUNCTIONS.iter().any(|(n, _, _)| *n == lower)
}

/// Resolves a call by name and argument count.
pub fn lookup_function(name: &str, argc: usize) -> CalcResult<Builtin> {
    let lower = name.to_ascii_lowercase();
    let candidates: Vec<&(&str, usize, Builtin)> =
        FUNCTIONS.iter().filter(|(n, _, _)| *n == lower).collect();
    if candidates.is_empty() {
        return Err(CalcError::UnknownFunction(name.to_string()));
    }
    candidates
        .iter()
        .find(|(_, arity, _)| *arity == argc)
        .map(|(_, _, builtin)| *builtin)
        .ok_or_else(|| CalcError::Arity {
            name: name.to_string(),
            expected: candidates
                .iter()
                .map(|(_, arity, _)| arity.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
            got: argc,
        })
}

impl Builtin {
    pub fn apply(self, args: &[f64], mode: AngleMode) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Builtin::Sin => trig::sin(a, mode),
            Builtin::Cos => trig::cos(a, mode),
            Builtin::Tan => trig::tan(a, mode),
            Builtin::Asin => trig::asin(a, mode),
            Builtin::Acos => trig::acos(a, mode),
            Builtin::Atan => trig::atan(a, mode),
            Builtin::Sec => trig::sec(a, mode),
            Builtin::Csc => trig::csc(a, mode),
            Builtin::Cot => trig::cot(a, mode),
            Builtin::Sinh => trig::sinh(a),
            Builtin::Cosh => trig::cosh(a),
            Builtin::Tanh => trig::tanh(a),
            Builtin::Sqrt => a.sqrt(),
            Builtin::Cbrt => a.cbrt(),
            Builtin::Root => algebra::nth_root(a, b),
            Builtin::Pow => a.powf(b),
            Builtin::Abs => a.abs(),
            Builtin::Floor => a.floor(),
            Builtin::Ceil => a.ceil(),
            Builtin::Round => algebra::round_half_up(a),
            Builtin::Trunc => a.trunc(),
            Builtin::Exp => a.exp(),
            Builtin::Pow10 => 10f64.powf(a),
            Builtin::Ln => a.ln(),
            Builtin::Log10 => a.log10(),
            Builtin::LogBase => a.ln() / b.ln(),
            Builtin::Factorial => number_theory::factorial(a),
            Builtin::Perm => number_theory::permutation(a, b),
            Builtin::Comb => number_theory::combination(a, b),
            Builtin::Gcd => number_theory::gcd(a, b),
            Builtin::Lcm => number_theory::lcm(a, b),
            Builtin::Mod => number_theory::modulo(a, b),
            Builtin::IsPrime => {
                if number_theory::is_prime(a) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// OpCodes for the Stack-based Virtual Machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpCode {
    /// Pushes a constant onto the stack.
    LoadConst(f64),
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
    /// Pops top two values (b, a), pushes (a ^ b).
    Pow,
    /// Pops top two values (b, a), pushes the remainder of a / b.
    Rem,
    /// Pops top value (a), pushes -a.
    Neg,
    /// Pops top value (a), pushes a / 100.
    Percent,
    /// Pops top value (a), pushes floor(a)!.
    Factorial,
    /// Pops `argc` values (last argument on top), pushes the call result.
    Call(Builtin, usize),
}

/// Represents a compiled sequence of operations.
#[derive(Debug, Clone, Default)]
pub struct Bytecode {
    pub ops: Vec<OpCode>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }
}

/// Stack-based Virtual Machine for evaluating compiled expressions.
///
/// The VM is stateless; `execute` takes the bytecode, the angle mode used by
/// trigonometric calls, and a scratch stack it may reuse between runs.
pub struct VM;

impl VM {
    pub fn execute(bytecode: &Bytecode, mode: AngleMode, stack: &mut Vec<f64>) -> f64 {
        stack.clear();

        // Well-formed bytecode never underflows; NaN keeps a bad program visible.
        fn pop(stack: &mut Vec<f64>) -> f64 {
            stack.pop().unwrap_or(f64::NAN)
        }

        for op in &bytecode.ops {
            match *op {
                OpCode::LoadConst(val) => stack.push(val),
                OpCode::Add => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a + b);
                }
                OpCode::Sub => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a - b);
                }
                OpCode::Mul => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a * b);
                }
                OpCode::Div => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a / b);
                }
                OpCode::Pow => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a.powf(b));
                }
                OpCode::Rem => {
                    let b = pop(stack);
                    let a = pop(stack);
                    stack.push(a % b);
                }
                OpCode::Neg => {
                    let a = pop(stack);
                    stack.push(-a);
                }
                OpCode::Percent => {
                    let a = pop(stack);
                    stack.push(a / 100.0);
                }
                OpCode::Factorial => {
                    let a = pop(stack);
                    stack.push(number_theory::factorial(a));
                }
                OpCode::Call(builtin, argc) => {
                    let split = stack.len().saturating_sub(argc);
                    let args: Vec<f64> = stack.drain(split..).collect();
                    stack.push(builtin.apply(&args, mode));
                }
            }
        }

        pop(stack)
    }
}

// --- AST & Parser ---

/// Abstract Syntax Tree nodes for expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(Box<Expr>, char, Box<Expr>), // +, -, *, /, ^, % (remainder)
    Unary(char, Box<Expr>),             // - (negate), % (percent), ! (factorial)
    Call(String, Vec<Expr>),
}

/// Compiles an AST (`Expr`) into `Bytecode`, resolving function names
/// against the builtin table.
pub struct Compiler;

impl Compiler {
    pub fn compile(expr: &Expr) -> CalcResult<Bytecode> {
        let mut ops = Vec::new();
        Self::compile_recursive(expr, &mut ops)?;
        Ok(Bytecode { ops })
    }

    fn compile_recursive(expr: &Expr, ops: &mut Vec<OpCode>) -> CalcResult<()> {
        match expr {
            Expr::Number(n) => ops.push(OpCode::LoadConst(*n)),
            Expr::Variable(name) => {
                return Err(CalcError::UnknownIdentifier(name.clone()));
            }
            Expr::Binary(left, op, right) => {
                Self::compile_recursive(left, ops)?;
                Self::compile_recursive(right, ops)?;
                ops.push(match op {
                    '+' => OpCode::Add,
                    '-' => OpCode::Sub,
                    '*' => OpCode::Mul,
                    '/' => OpCode::Div,
                    '^' => OpCode::Pow,
                    '%' => OpCode::Rem,
                    other => {
                        return Err(CalcError::Parse(format!("unknown binary operator '{other}'")))
                    }
                });
            }
            Expr::Unary(op, operand) => {
                Self::compile_recursive(operand, ops)?;
                ops.push(match op {
                    '-' => OpCode::Neg,
                    '%' => OpCode::Percent,
                    '!' => OpCode::Factorial,
                    other => {
                        return Err(CalcError::Parse(format!("unknown unary operator '{other}'")))
                    }
                });
            }
            Expr::Call(name, args) => {
                let builtin = lookup_function(name, args.len())?;
                for arg in args {
                    Self::compile_recursive(arg, ops)?;
                }
                ops.push(OpCode::Call(builtin, args.len()));
            }
        }
        Ok(())
    }
}

// --- Tokenizer ---

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    Bang,
    /// `√`, a prefix square root.
    Root,
    Comma,
    LParen,
    RParen,
}

impl Token {
    /// Tokens that can begin an operand.
    fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Identifier(_) | Token::LParen | Token::Root
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) if n.is_nan() => write!(f, "NaN"),
            Token::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Token::Number(n) => write!(f, "{n}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Percent => write!(f, "%"),
            Token::Bang => write!(f, "!"),
            Token::Root => write!(f, "√"),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut num_str = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    num_str.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            // Exponent only when digits follow; otherwise `e` is Euler's number.
            if matches!(chars.peek(), Some('e') | Some('E')) {
                let mut lookahead = chars.clone();
                lookahead.next();
                let mut exponent = String::from("e");
                if let Some(&sign) = lookahead.peek() {
                    if sign == '+' || sign == '-' {
                        exponent.push(sign);
                        lookahead.next();
                    }
                }
                if lookahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                    while let Some(&d) = lookahead.peek() {
                        if d.is_ascii_digit() {
                            exponent.push(d);
                            lookahead.next();
                        } else {
                            break;
                        }
                    }
                    num_str.push_str(&exponent);
                    chars = lookahead;
                }
            }
            let value: f64 = num_str
                .parse()
                .map_err(|_| CalcError::Parse(format!("malformed number '{num_str}'")))?;
            tokens.push(Token::Number(value));
        } else if c == 'π' || c == 'φ' {
            tokens.push(Token::Identifier(c.to_string()));
            chars.next();
        } else if c == '√' {
            tokens.push(Token::Root);
            chars.next();
        } else if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if (d.is_alphanumeric() || d == '_') && d != 'π' && d != 'φ' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Identifier(ident));
        } else {
            let token = match c {
                '+' => Token::Plus,
                '-' | '−' => Token::Minus,
                '*' | '×' => {
                    chars.next();
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        tokens.push(Token::Caret);
                    } else {
                        tokens.push(Token::Star);
                    }
                    continue;
                }
                '/' | '÷' => Token::Slash,
                '^' => Token::Caret,
                '%' => Token::Percent,
                '!' => Token::Bang,
                ',' => Token::Comma,
                '(' => Token::LParen,
                ')' => Token::RParen,
                other => return Err(CalcError::Parse(format!("unexpected character '{other}'"))),
            };
            tokens.push(token);
            chars.next();
        }
    }
    Ok(tokens)
}

/// Parses a string expression into an AST.
pub fn parse(input: &str) -> CalcResult<Expr> {
    let tokens = tokenize(input)?;
    parse_tokens(&tokens)
}

/// Parses an already tokenized expression. The whole stream must be consumed.
pub fn parse_tokens(tokens: &[Token]) -> CalcResult<Expr> {
    if tokens.is_empty() {
        return Err(CalcError::Parse("empty expression".into()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(CalcError::Parse(format!("unexpected '{token}'"))),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn consume(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_rparen(&mut self) -> CalcResult<()> {
        match self.consume() {
            Some(Token::RParen) => Ok(()),
            Some(other) => Err(CalcError::Parse(format!("expected ')', found '{other}'"))),
            None => Err(CalcError::Parse("expected ')'".into())),
        }
    }

    fn parse_expression(&mut self) -> CalcResult<Expr> {
        self.parse_term()
    }

    fn parse_term(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_factor()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => '+',
                Token::Minus => '-',
                _ => break,
            };
            self.consume();
            let right = self.parse_factor()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.peek() {
            match token {
                Token::Star | Token::Slash | Token::Percent => {
                    let op = match token {
                        Token::Star => '*',
                        Token::Slash => '/',
                        _ => '%',
                    };
                    self.consume();
                    let right = self.parse_unary()?;
                    left = Expr::Binary(Box::new(left), op, Box::new(right));
                }
                // Implicit multiplication: `3x`, `2(x+1)`, `(a)(b)`.
                t if t.starts_operand() => {
                    let right = self.parse_power()?;
                    left = Expr::Binary(Box::new(left), '*', Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.consume();
                let expr = self.parse_unary()?;
                Ok(Expr::Unary('-', Box::new(expr)))
            }
            Some(Token::Plus) => {
                self.consume();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    /// Right associative; the exponent may carry its own sign (`2^-1`).
    fn parse_power(&mut self) -> CalcResult<Expr> {
        let base = self.parse_postfix()?;
        if let Some(Token::Caret) = self.peek() {
            self.consume();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(Box::new(base), '^', Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> CalcResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::Bang) => {
                    self.consume();
                    expr = Expr::Unary('!', Box::new(expr));
                }
                // `%` followed by an operand is the remainder operator.
                Some(Token::Percent) if !self.peek_at(1).is_some_and(Token::starts_operand) => {
                    self.consume();
                    expr = Expr::Unary('%', Box::new(expr));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> CalcResult<Expr> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(*n)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.consume(); // eat '('
                    let args = self.parse_arguments()?;
                    Ok(Expr::Call(name.clone(), args))
                } else {
                    Ok(Expr::Variable(name.clone()))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            // Binds tighter than `^`: `√4^2` is `(√4)^2`.
            Some(Token::Root) => {
                let operand = self.parse_postfix()?;
                Ok(Expr::Call("sqrt".to_string(), vec![operand]))
            }
            Some(other) => Err(CalcError::Parse(format!("unexpected '{other}'"))),
            None => Err(CalcError::Parse("unexpected end of expression".into())),
        }
    }

    fn parse_arguments(&mut self) -> CalcResult<Vec<Expr>> {
        let mut args = Vec::new();
        if let Some(Token::RParen) = self.peek() {
            self.consume();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            match self.peek() {
                Some(Token::Comma) => {
                    self.consume();
                }
                _ => break,
            }
        }
        self.expect_rparen()?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> f64 {
        run_in(input, AngleMode::Radian)
    }

    fn run_in(input: &str, mode: AngleMode) -> f64 {
        let expr = parse(input).expect("expression should parse");
        let code = Compiler::compile(&expr).expect("expression should compile");
        VM::execute(&code, mode, &mut Vec::new())
    }

    fn assert_err_contains<T: std::fmt::Debug>(result: CalcResult<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn tokenizes_scientific_literals_without_eating_euler() {
        assert_eq!(tokenize("1.5e3").unwrap(), vec![Token::Number(1500.0)]);
        assert_eq!(tokenize("2E-2").unwrap(), vec![Token::Number(0.02)]);
        assert_eq!(
            tokenize("2e").unwrap(),
            vec![Token::Number(2.0), Token::Identifier("e".into())]
        );
        assert_eq!(
            tokenize("3exp(1)").unwrap()[..2],
            [Token::Number(3.0), Token::Identifier("exp".into())]
        );
    }

    #[test]
    fn tokenizer_rejects_malformed_input() {
        assert_err_contains(tokenize("1.2.3"), "malformed number");
        assert_err_contains(tokenize("2 # 3"), "unexpected character");
    }

    #[test]
    fn symbols_split_from_neighbours() {
        assert_eq!(
            tokenize("2π").unwrap(),
            vec![Token::Number(2.0), Token::Identifier("π".into())]
        );
        assert_eq!(tokenize("√4").unwrap(), vec![Token::Root, Token::Number(4.0)]);
        assert_eq!(tokenize("2**3").unwrap()[1], Token::Caret);
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(run("2+3*4"), 14.0);
        assert_eq!(run("2^10"), 1024.0);
        assert_eq!(run("2^3^2"), 512.0);
        assert_eq!(run("-2^2"), -4.0);
        assert_eq!(run("2^-1"), 0.5);
        assert_eq!(run("(2+3)*4"), 20.0);
        assert_eq!(run("10-4-3"), 3.0);
        assert_eq!(run("--3"), 3.0);
    }

    #[test]
    fn percent_and_remainder() {
        assert_eq!(run("50%"), 0.5);
        assert_eq!(run("200*10%"), 20.0);
        assert_eq!(run("7%3"), 1.0);
        assert_eq!(run("7 % (2+1)"), 1.0);
        assert_eq!(run("50%-0.25"), 0.25);
    }

    #[test]
    fn factorial_postfix_floors() {
        assert_eq!(run("5!"), 120.0);
        assert_eq!(run("3.9!"), 6.0);
        assert_eq!(run("2*3!"), 12.0);
        assert!(run("(-1)!").is_nan());
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(run("2(3+1)"), 8.0);
        assert_eq!(run("(2)(3)"), 6.0);
        assert_eq!(run("3(2)^2"), 12.0);
    }

    #[test]
    fn function_calls_use_table() {
        assert_eq!(run("sqrt(16)"), 4.0);
        assert_eq!(run("√4"), 2.0);
        assert_eq!(run("2√9"), 6.0);
        assert_eq!(run("√(16)"), 4.0);
        assert_eq!(run("√√16"), 2.0);
        assert_eq!(run("√4^2"), 4.0);
        assert!((run("log(1000)") - 3.0).abs() < 1e-12);
        assert!((run("log(8, 2)") - 3.0).abs() < 1e-12);
        assert_eq!(run("ABS(-2)"), 2.0);
        assert_eq!(run("round(2.5)"), 3.0);
        assert_eq!(run("nCr(5,2)"), 10.0);
        assert_eq!(run("isprime(97)"), 1.0);
        assert!((run_in("sin(90)", AngleMode::Degree) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn compile_errors_are_reported() {
        assert_err_contains(Compiler::compile(&parse("foo(1)").unwrap()), "unknown function");
        assert_err_contains(Compiler::compile(&parse("y+1").unwrap()), "unknown identifier");
        assert_err_contains(Compiler::compile(&parse("sqrt(1,2)").unwrap()), "expects 1");
        assert_err_contains(Compiler::compile(&parse("log()").unwrap()), "1 or 2");
    }

    #[test]
    fn parse_errors_are_reported() {
        assert_err_contains(parse(""), "empty");
        assert_err_contains(parse("2+"), "unexpected end");
        assert_err_contains(parse("2)"), "unexpected ')'");
        assert_err_contains(parse("(2"), "expected ')'");
        assert_err_contains(parse("*3"), "unexpected '*'");
    }

    #[test]
    fn ieee_division_is_not_trapped() {
        assert_eq!(run("1/0"), f64::INFINITY);
        assert_eq!(run("-1/0"), f64::NEG_INFINITY);
        assert!(run("0/0").is_nan());
    }

    #[test]
    fn function_names_are_recognized_case_insensitively() {
        assert!(is_function_name("Sin"));
        assert!(is_function_name("log10"));
        assert!(!is_function_name("x"));
    }
}
