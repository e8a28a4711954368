use crate::{
    address::{Address, Pointer},
    instruction::{kind::InstructionKind, Operand, Operation},
};

use super::{assemble, AssemblyError, AssemblyErrorKind, Assembler, Strictness};

fn permissive(source: &str) -> Result<crate::program::Program, AssemblyError> {
    Assembler::new(Strictness::Permissive).assemble(source)
}

#[test]
fn octal_and_decimal_addresses_agree() {
    let program = assemble("cpy $007,007, $d7,7\ncpy $0707, $o7,7").unwrap();

    let expected = Operand::Direct(Address::new(7, 7));

    for operation in program.operations() {
        assert_eq!(operation.operands, [expected.clone(), expected.clone()]);
    }
}

#[test]
fn coordinate_pair_is_x_then_y() {
    let program = assemble("cpy $000,001, 5").unwrap();

    assert_eq!(
        program.operation(0).unwrap().operand(0),
        Some(&Operand::Direct(Address::new(0, 1)))
    );
}

#[test]
fn pointer_literal_pairs_with_previous_cell() {
    let program = assemble("cpy @010,002, 1").unwrap();

    assert_eq!(
        program.operation(0).unwrap().operand(0),
        Some(&Operand::Pointer(Pointer {
            x_cell: Address::new(8, 2),
            y_cell: Address::new(7, 2),
        }))
    );
}

#[test]
fn labels_do_not_take_an_index() {
    let source = "\
start:
cpy $000,000, 5
add $000,001, $000,000, $000,000

middle:
jmp :start
jmp :middle
end:";

    let program = assemble(source).unwrap();

    assert_eq!(program.len(), 4);
    assert_eq!(program.label("start"), Some(0));
    assert_eq!(program.label("middle"), Some(2));
    assert_eq!(program.label("end"), Some(4));

    assert_eq!(
        program.operation(3).unwrap(),
        &Operation::new(InstructionKind::Jmp)
            .with_operand(Operand::Label {
                name: "middle".to_string(),
                index: 2,
            })
            .with_line(7)
    );
}

#[test]
fn forward_label_reference() {
    let program = assemble("jmp :later\ncpy $0, 1\nlater:\ncpy $1, 2").unwrap();

    assert_eq!(
        program.operation(0).unwrap().operand(0),
        Some(&Operand::Label {
            name: "later".to_string(),
            index: 2,
        })
    );
}

#[test]
fn undefined_label_fails_in_both_modes() {
    let expected = AssemblyError {
        line: 2,
        kind: AssemblyErrorKind::UndefinedLabel("nowhere".to_string()),
    };

    assert_eq!(assemble("cpy $0, 1\njmp :nowhere"), Err(expected.clone()));
    assert_eq!(permissive("cpy $0, 1\njmp :nowhere"), Err(expected));
}

#[test]
fn duplicate_label() {
    let error = assemble("a:\ncpy $0, 1\na:").unwrap_err();

    assert_eq!(error.line, 3);
    assert_eq!(error.kind, AssemblyErrorKind::DuplicateLabel("a".to_string()));
}

#[test]
fn unknown_mnemonic() {
    assert_eq!(
        assemble("nop").unwrap_err().kind,
        AssemblyErrorKind::UnknownMnemonic("nop".to_string())
    );

    let program = permissive("nop $0, 1").unwrap();
    let operation = program.operation(0).unwrap();

    assert_eq!(operation.kind, None);
    assert_eq!(operation.mnemonic, "nop");
    assert_eq!(operation.operands.len(), 2);
}

#[test]
fn malformed_tokens() {
    assert_eq!(
        assemble("cpy $0z, 1").unwrap_err().kind,
        AssemblyErrorKind::MalformedAddress("$0z".to_string())
    );
    assert_eq!(
        assemble("cpy $0, five").unwrap_err().kind,
        AssemblyErrorKind::MalformedLiteral("five".to_string())
    );
    assert_eq!(
        assemble("cpy $d64,0, 1").unwrap_err().kind,
        AssemblyErrorKind::AddressOutOfRange("$d64,0".to_string())
    );
    assert_eq!(
        assemble("cpy $10000, 1").unwrap_err().kind,
        AssemblyErrorKind::AddressOutOfRange("$10000".to_string())
    );
}

#[test]
fn permissive_tokens_degrade() {
    let program = permissive("cpy $0z, five\ncpy $d70,1, -1\ncpy $123456, 12abc").unwrap();

    let operands: Vec<_> = program
        .operations()
        .iter()
        .map(|operation| operation.operands.clone())
        .collect();

    assert_eq!(
        operands,
        [
            vec![Operand::Direct(Address::new(0, 0)), Operand::Literal(0)],
            vec![Operand::Direct(Address::new(6, 1)), Operand::Literal(u16::MAX)],
            // Only the last four octal digits count: 0o3456.
            vec![Operand::Direct(Address::from_index(0o3456)), Operand::Literal(12)],
        ]
    );
}

#[test]
fn permissive_blank_lines_take_an_index() {
    let program = permissive("cpy $0, 1\n\nend:\njmp :end").unwrap();

    assert_eq!(program.len(), 3);
    assert_eq!(program.label("end"), Some(2));
    assert_eq!(program.operation(1), Some(&Operation::unknown("").with_line(2)));

    // Strict assembly skips them.
    let program = assemble("cpy $0, 1\n\nend:\njmp :end").unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(program.label("end"), Some(1));
}

#[test]
fn operand_shape_checks() {
    assert_eq!(
        assemble("add $0, 1").unwrap_err().kind,
        AssemblyErrorKind::OperandCount {
            kind: InstructionKind::Add,
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(
        assemble("cpy 4, 1").unwrap_err().kind,
        AssemblyErrorKind::NotAddressable("4".to_string())
    );
    assert_eq!(
        assemble("a:\ncpy $0, :a").unwrap_err().kind,
        AssemblyErrorKind::MisplacedLabel("a".to_string())
    );

    assert!(permissive("add $0, 1").is_ok());
}

#[test]
fn invalid_label_name_is_strict_only() {
    assert_eq!(
        assemble("two words:").unwrap_err().kind,
        AssemblyErrorKind::InvalidLabel("two words".to_string())
    );

    let program = permissive("two words:\ncpy $0, 1").unwrap();
    assert_eq!(program.label("two words"), Some(0));
}

#[test]
fn whitespace_and_commas() {
    let program = assemble("   cpy   $1 ,  2   \n\n\t\n").unwrap();

    assert_eq!(program.len(), 1);
    assert_eq!(
        program.operation(0).unwrap().operands,
        [Operand::Direct(Address::new(1, 0)), Operand::Literal(2)]
    );
}

#[test]
fn listing_shows_labels() {
    let program = assemble("top:\ncpy $0, 1\njmp :top").unwrap();

    assert_eq!(
        program.to_string(),
        "top:\n    0  cpy $000,000, 1\n    1  jmp :top\n"
    );
}
