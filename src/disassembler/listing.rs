use crate::instruction::Instruction;

/// Textual listing of a decoded method body.
#[derive(Debug)]
pub struct Listing {
    code: Vec<Instruction>,
    str: String,
}

impl Listing {
    #[tracing::instrument]
    pub fn new(code: Vec<Instruction>) -> Self {
        Self {
            code,
            str: String::new(),
        }
    }

    /// Generate one listing line from a decoded instruction
    ///
    /// E.g. `IL_0004:  ldc.i4.s 10`
    #[tracing::instrument]
    pub fn generate_line(instruction: &Instruction) -> String {
        format!("{}:  {}\n", instruction.label(), instruction)
    }

    #[tracing::instrument]
    pub fn generate(&mut self) -> String {
        for instruction in &self.code {
            self.str.push_str(Listing::generate_line(instruction).as_str());
        }

        self.str.clone()
    }
}
