//! Fake toolchain scripts.
//!
//! Both tools answer `--version` and append every other invocation to the
//! file named by `DENIM_FAKE_LOG`, one line per call.

/// Stands in for `nim`: writes a two-unit manifest into `--nimcache:<dir>`
pub const FAKE_NIM: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "Nim Compiler Version 2.0.8 [Linux: amd64]"
  exit 0
fi
echo "nim $*" >> "$DENIM_FAKE_LOG"
cache=""
for arg in "$@"; do
  case "$arg" in
    --nimcache:*) cache="${arg#--nimcache:}" ;;
  esac
done
if [ -n "$DENIM_FAKE_NO_MANIFEST" ]; then
  mkdir -p "$cache"
  exit 0
fi
mkdir -p "$cache"
cat > "$cache/hello.json" <<JSON
{
  "compile": [
    ["$cache/@mhello.nim.c", "clang -c -w -O3 @mhello.nim.c -o @mhello.nim.c.o"],
    ["$cache/stdlib_system.nim.c", "clang -c -w -O3 stdlib_system.nim.c -o stdlib_system.nim.c.o"]
  ],
  "link": ["@mhello.nim.c.o", "stdlib_system.nim.c.o", "hello.res"],
  "outputFile": "hello"
}
JSON
"#;

/// Stands in for Obfuscator-LLVM's `clang`; fails any call naming
/// `DENIM_FAKE_FAIL` as an argument
pub const FAKE_CLANG: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "Obfuscator-LLVM clang version 4.0.1"
  exit 0
fi
echo "clang $*" >> "$DENIM_FAKE_LOG"
if [ -n "$DENIM_FAKE_FAIL" ]; then
  for arg in "$@"; do
    if [ "$arg" = "$DENIM_FAKE_FAIL" ]; then
      echo "error: cannot compile $arg" >&2
      exit 1
    fi
  done
fi
exit 0
"#;

/// Key derived from seed material "abc"
pub const ABC_KEY: &str = "ba7816bf8f01cfea414140de5dae2223";

pub const HELLO_NIM: &str = "echo \"hello\"\n";
