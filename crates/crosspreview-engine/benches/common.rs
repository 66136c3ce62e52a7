// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_view_source(rows: usize) -> String {
    let mut body = String::new();
    for row in 0..rows {
        body.push_str(&format!(
            "            HStack(spacing: 8) {{\n                Image(systemName: \"star.fill\")\n                Text(\"Row {row}\").font(.headline).foregroundColor(.blue)\n                Spacer()\n            }}\n            .padding(8)\n            .cornerRadius(6)\n"
        ));
    }
    format!(
        "import SwiftUI\n\nstruct Generated: View {{\n    var body: some View {{\n        VStack(alignment: .leading) {{\n{body}        }}\n    }}\n}}\n"
    )
}

#[allow(dead_code)]
pub fn generate_for_each_source(count: usize) -> String {
    format!(
        "struct Repeated: View {{\n    var body: some View {{\n        List {{\n            ForEach(0..<{count}) {{ i in\n                Text(\"Item \\(i)\").padding()\n            }}\n        }}\n    }}\n}}\n"
    )
}
