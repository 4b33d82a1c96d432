use texthuff::{bit_string, build_tree, CodeTable, FrequencyTable};

fn main() -> Result<(), texthuff::Error> {
    let s = String::from("Hello my name is Sam!");
    let tree = build_tree(&FrequencyTable::from_text(&s))?;
    let codes = CodeTable::from_tree(&tree);

    for (symbol, code) in codes.iter() {
        println!("{:?}\t{}", symbol, bit_string(code));
    }

    let blob = texthuff::compress(&s)?;
    let dec = texthuff::decompress(&blob)?;

    println!("{} chars -> {} bytes: {:?}", s.len(), blob.len(), dec);
    Ok(())
}
