//! Tokenize a snippet with a sigil, a heredoc and interpolation.

fn main() {
    let input = "\
defmodule Greeter do
  @doc \"\"\"
    Says hello to #{name}.
  \"\"\"
  def hello(name), do: String.match?(name, ~r/^[a-z]+$/iu)
end
";

    let lexed = exlex::tokenize(input);

    for token in &lexed.tokens {
        let (line, column) = lexed.source.line_col(token.span.start);
        println!(
            "{line:>3}:{column:<3} {:<20} {:<16} {:?}",
            format!("{:?}", token.kind),
            format!("{:?}", token.state),
            lexed.value(token)
        );
    }

    println!();
    println!("Tokens: {}", lexed.tokens.len());
    println!("Balanced: {}", lexed.is_balanced());
}
